//! The Zig download index (`index.json`).
//!
//! The index is a JSON object keyed by version. Each version maps platform
//! keys to artifact descriptors, interleaved with scalar release metadata:
//!
//! ```json
//! {
//!   "master": { "version": "0.14.0-dev.1+abc", "x86_64-linux": { ... } },
//!   "0.13.0": {
//!     "date": "2024-06-07",
//!     "x86_64-linux": {
//!       "tarball": "https://ziglang.org/download/0.13.0/zig-linux-x86_64-0.13.0.tar.xz",
//!       "shasum": "d45312e61ebcc48032b77bc4cf7fd6915c11fa16e4aad116b66c9468211230ea",
//!       "size": "47082308"
//!     }
//!   }
//! }
//! ```
//!
//! The `master` entry is the development sentinel. It can be looked up by
//! name but never takes part in ordering.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::hash::Sha256Digest;
use crate::platform::PlatformKey;

/// Catalog key of the development (unstable) build.
pub const DEV_SENTINEL: &str = "master";

/// Lookup failures against a [`VersionCatalog`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The version is not present in the catalog.
    #[error("There is no such version: {0}")]
    UnknownVersion(String),

    /// The version exists but has no artifact for the platform.
    #[error("No tarball link for {platform} in {version}")]
    UnsupportedPlatform {
        /// Requested version.
        version: String,
        /// Requested platform key.
        platform: String,
    },

    /// The catalog contains no releases besides the development sentinel.
    #[error("The version index contains no releases")]
    EmptyCatalog,

    /// A catalog key is neither the sentinel nor a dot-separated integer list.
    #[error("Invalid release version '{0}': expected dot-separated integers")]
    InvalidVersion(String),

    /// The entry for a platform is not a valid artifact descriptor.
    #[error("Invalid artifact entry for {platform}: {reason}")]
    InvalidArtifact {
        /// Platform key of the malformed entry.
        platform: String,
        /// Why the descriptor was rejected.
        reason: String,
    },
}

/// A release identifier such as `0.13.0`, ordered component-wise as an
/// integer tuple (`0.9.0` < `0.10.0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReleaseVersion {
    parts: Vec<u64>,
    raw: String,
}

impl ReleaseVersion {
    /// The identifier exactly as it appears in the index.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for ReleaseVersion {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| CatalogError::InvalidVersion(s.to_string()))?;

        Ok(Self {
            parts,
            raw: s.to_string(),
        })
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Download metadata for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtifactDescriptor {
    /// Absolute origin URL of the artifact.
    #[serde(rename = "tarball")]
    pub url: String,

    /// Expected SHA-256 of the full body.
    #[serde(rename = "shasum")]
    pub digest: Sha256Digest,

    /// Size in bytes; `0` means unknown and only affects progress display.
    #[serde(rename = "size", default, deserialize_with = "size_from_number_or_string")]
    pub size_bytes: u64,
}

impl ArtifactDescriptor {
    /// Create a descriptor from already validated parts.
    pub fn new(url: impl Into<String>, digest: Sha256Digest, size_bytes: u64) -> Self {
        Self {
            url: url.into(),
            digest,
            size_bytes,
        }
    }

    /// Final path segment of the origin URL.
    ///
    /// Example: `"https://ziglang.org/download/0.13.0/zig-linux-x86_64-0.13.0.tar.xz"`
    /// -> `"zig-linux-x86_64-0.13.0.tar.xz"`
    pub fn filename(&self) -> &str {
        self.url.split('/').next_back().unwrap_or("")
    }

    /// The size when known.
    pub fn size_hint(&self) -> Option<u64> {
        (self.size_bytes > 0).then_some(self.size_bytes)
    }
}

/// The index writes sizes as decimal strings; accept plain integers too.
fn size_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(u64),
        Text(String),
    }

    match Size::deserialize(deserializer)? {
        Size::Number(n) => Ok(n),
        Size::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid artifact size '{s}'"))),
    }
}

/// Platform key -> artifact map for a single version, plus the scalar
/// metadata (`date`, `docs`, `notes`, ...) that shares the same JSON object.
///
/// Artifact objects are kept as raw JSON and only decoded when looked up, so
/// a malformed entry for one platform never hides the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct PlatformArtifactMap {
    artifacts: BTreeMap<String, serde_json::Value>,
    metadata: BTreeMap<String, String>,
}

impl PlatformArtifactMap {
    /// Artifact for an exact platform key string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidArtifact`] if the entry exists but is
    /// not a valid descriptor.
    pub fn get(&self, platform: &str) -> Result<Option<ArtifactDescriptor>, CatalogError> {
        let Some(raw) = self.artifacts.get(platform) else {
            return Ok(None);
        };
        ArtifactDescriptor::deserialize(raw)
            .map(Some)
            .map_err(|e| CatalogError::InvalidArtifact {
                platform: platform.to_string(),
                reason: e.to_string(),
            })
    }

    /// Artifact for a resolved [`PlatformKey`].
    ///
    /// # Errors
    ///
    /// Same as [`PlatformArtifactMap::get`].
    pub fn for_platform(
        &self,
        platform: &PlatformKey,
    ) -> Result<Option<ArtifactDescriptor>, CatalogError> {
        self.get(&platform.to_string())
    }

    /// Whether an artifact entry exists for the platform key string.
    pub fn contains(&self, platform: &str) -> bool {
        self.artifacts.contains_key(platform)
    }

    /// Scalar metadata value such as `date` or `version`.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Number of artifact entries.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// True when the map holds no artifact entries.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for PlatformArtifactMap {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut map = Self::default();
        for (key, value) in raw {
            match value {
                serde_json::Value::Object(_) => {
                    map.artifacts.insert(key, value);
                }
                serde_json::Value::String(s) => {
                    map.metadata.insert(key, s);
                }
                serde_json::Value::Null => {}
                other => {
                    map.metadata.insert(key, other.to_string());
                }
            }
        }
        map
    }
}

/// Every version in the index with its per-platform artifacts.
///
/// Releases are kept in a `BTreeMap` keyed by [`ReleaseVersion`], so
/// iteration order is the numeric order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, PlatformArtifactMap>")]
pub struct VersionCatalog {
    releases: BTreeMap<ReleaseVersion, PlatformArtifactMap>,
    development: Option<PlatformArtifactMap>,
}

impl VersionCatalog {
    /// Release versions in ascending order. The development sentinel is
    /// never included.
    pub fn list_versions(&self) -> Vec<&ReleaseVersion> {
        self.releases.keys().collect()
    }

    /// Highest release version.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyCatalog`] if the catalog holds no
    /// releases.
    pub fn latest(&self) -> Result<&ReleaseVersion, CatalogError> {
        self.releases
            .keys()
            .next_back()
            .ok_or(CatalogError::EmptyCatalog)
    }

    /// Platform map for a version identifier, including the sentinel.
    pub fn get(&self, version: &str) -> Option<&PlatformArtifactMap> {
        if version == DEV_SENTINEL {
            return self.development.as_ref();
        }
        let version = version.parse::<ReleaseVersion>().ok()?;
        self.releases.get(&version)
    }

    /// Whether the version is present at the top level of the catalog.
    pub fn contains(&self, version: &str) -> bool {
        self.get(version).is_some()
    }

    /// The development build entry, if the index carries one.
    pub fn development(&self) -> Option<&PlatformArtifactMap> {
        self.development.as_ref()
    }

    /// Artifact for `version` on `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownVersion`] if the version is absent,
    /// [`CatalogError::UnsupportedPlatform`] if the version exists but has no
    /// artifact for the platform, and [`CatalogError::InvalidArtifact`] if
    /// that artifact entry is malformed.
    pub fn lookup_artifact(
        &self,
        version: &str,
        platform: &PlatformKey,
    ) -> Result<ArtifactDescriptor, CatalogError> {
        let links = self
            .get(version)
            .ok_or_else(|| CatalogError::UnknownVersion(version.to_string()))?;

        links
            .for_platform(platform)?
            .ok_or_else(|| CatalogError::UnsupportedPlatform {
                version: version.to_string(),
                platform: platform.to_string(),
            })
    }

    /// Number of releases, excluding the sentinel.
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// True when there are no releases besides the sentinel.
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

impl TryFrom<BTreeMap<String, PlatformArtifactMap>> for VersionCatalog {
    type Error = CatalogError;

    fn try_from(raw: BTreeMap<String, PlatformArtifactMap>) -> Result<Self, Self::Error> {
        let mut catalog = Self::default();
        for (key, links) in raw {
            if key == DEV_SENTINEL {
                catalog.development = Some(links);
            } else {
                catalog.releases.insert(key.parse()?, links);
            }
        }
        Ok(catalog)
    }
}
