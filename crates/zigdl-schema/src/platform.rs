//! Platform keys in the index's `{arch}-{os}` vocabulary.
//!
//! The host reports its OS and architecture in whatever spelling the platform
//! uses. Both are lowercased and passed through a small alias table so that,
//! for example, `darwin`/`arm64` becomes `aarch64-macos`. Values without an
//! alias pass through unchanged; such a key simply fails lookup later.
//!
//! # Example
//!
//! ```
//! use zigdl_schema::PlatformKey;
//!
//! let key = PlatformKey::from_raw("Darwin", "arm64");
//! assert_eq!(key.to_string(), "aarch64-macos");
//! ```

use std::fmt;

/// OS spellings that differ from the index's naming.
const OS_ALIASES: &[(&str, &str)] = &[("darwin", "macos")];

/// Architecture spellings collapsed onto the index's naming.
const ARCH_ALIASES: &[(&str, &str)] = &[
    ("i386", "x86"),
    ("i686", "x86"),
    ("amd64", "x86_64"),
    ("arm64", "aarch64"),
    ("armv7l", "armv7a"),
    ("arm", "armv7a"),
];

/// Composite `{arch}-{os}` key used to select an artifact from a
/// [`PlatformArtifactMap`](crate::PlatformArtifactMap).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformKey {
    arch: String,
    os: String,
}

impl PlatformKey {
    /// Resolve the key for the running host.
    ///
    /// Computed fresh on every call; nothing is cached.
    pub fn resolve() -> Self {
        Self::from_raw(std::env::consts::OS, host_arch())
    }

    /// Build a key from raw OS and architecture identifiers, applying the
    /// alias tables.
    pub fn from_raw(os: &str, arch: &str) -> Self {
        Self {
            arch: normalize(ARCH_ALIASES, arch),
            os: normalize(OS_ALIASES, os),
        }
    }

    /// Normalized architecture component (e.g. `x86_64`).
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Normalized OS component (e.g. `linux`).
    pub fn os(&self) -> &str {
        &self.os
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.arch, self.os)
    }
}

impl std::str::FromStr for PlatformKey {
    type Err = String;

    /// Parses an already-composed key such as `x86_64-linux`. Alias tables
    /// are applied to both halves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((arch, os)) if !arch.is_empty() && !os.is_empty() => Ok(Self::from_raw(os, arch)),
            _ => Err(format!("Invalid platform key '{s}': expected {{arch}}-{{os}}")),
        }
    }
}

fn normalize(aliases: &[(&str, &str)], raw: &str) -> String {
    let raw = raw.to_lowercase();
    match aliases.iter().find(|(from, _)| *from == raw) {
        Some((_, to)) => (*to).to_string(),
        None => raw,
    }
}

/// `std::env::consts::ARCH` does not distinguish endianness on `powerpc64`.
fn host_arch() -> &'static str {
    if cfg!(all(target_arch = "powerpc64", target_endian = "little")) {
        "powerpc64le"
    } else {
        std::env::consts::ARCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darwin_arm64_maps_to_aarch64_macos() {
        let key = PlatformKey::from_raw("darwin", "arm64");
        assert_eq!(key.os(), "macos");
        assert_eq!(key.arch(), "aarch64");
        assert_eq!(key.to_string(), "aarch64-macos");
    }

    #[test]
    fn x86_spellings_collapse() {
        assert_eq!(PlatformKey::from_raw("linux", "i386").to_string(), "x86-linux");
        assert_eq!(PlatformKey::from_raw("linux", "i686").to_string(), "x86-linux");
        assert_eq!(
            PlatformKey::from_raw("windows", "AMD64").to_string(),
            "x86_64-windows"
        );
    }

    #[test]
    fn unmapped_values_pass_through_lowercased() {
        let key = PlatformKey::from_raw("Plan9", "MIPS");
        assert_eq!(key.to_string(), "mips-plan9");
    }

    #[test]
    fn resolve_uses_host_os() {
        let key = PlatformKey::resolve();
        assert!(!key.arch().is_empty());
        #[cfg(target_os = "linux")]
        assert_eq!(key.os(), "linux");
        #[cfg(target_os = "macos")]
        assert_eq!(key.os(), "macos");
        #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
        assert_eq!(key.to_string(), "x86_64-linux");
    }

    #[test]
    fn parse_composed_key() {
        let key: PlatformKey = "arm64-darwin".parse().unwrap();
        assert_eq!(key.to_string(), "aarch64-macos");

        let key: PlatformKey = "powerpc64le-linux".parse().unwrap();
        assert_eq!(key.arch(), "powerpc64le");

        assert!("linux".parse::<PlatformKey>().is_err());
        assert!("-linux".parse::<PlatformKey>().is_err());
    }
}
