//! zigdl - Zig toolchain fetcher
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Lists Zig releases from the official download index and fetches a
//! verified tarball for the host platform, trying community mirrors before
//! ziglang.org. A matching ZLS build is fetched alongside when one exists.

pub mod cmd;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use zigdl_core::Config;
use zigdl_core::config::{DEFAULT_COMPANION_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_INDEX_URL};

#[derive(Debug, Parser)]
#[command(name = "zigdl")]
#[command(author, version, about = "zigdl - fetch Zig toolchains and matching ZLS builds")]
pub struct Cli {
    /// Zig download index
    #[arg(long, global = true, env = "ASDF_ZIG_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,

    /// Connect and read timeout, in seconds
    #[arg(long, global = true, env = "ASDF_ZIG_HTTP_TIMEOUT", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub http_timeout: u64,

    /// Mirror base URL (repeatable, or comma-separated in the environment)
    #[arg(long = "mirror", global = true, env = "ZIGDL_MIRRORS", value_delimiter = ',')]
    pub mirrors: Option<Vec<String>>,

    /// ZLS version-selection endpoint
    #[arg(long, global = true, env = "ZIGDL_COMPANION_URL", default_value = DEFAULT_COMPANION_URL)]
    pub companion_url: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every release version, oldest first
    AllVersions,
    /// Print the newest release version
    LatestVersion,
    /// Download Zig and the matching ZLS build for this host
    Download {
        /// Release version, e.g. 0.13.0
        version: String,
        /// Where to write the Zig tarball
        zig_out: PathBuf,
        /// Where to write the ZLS tarball
        zls_out: PathBuf,
    },
}

impl Cli {
    /// Runtime configuration for the core, from flags and environment.
    pub fn config(&self) -> Config {
        let mut config = Config::default()
            .with_index_url(&self.index_url)
            .with_companion_url(&self.companion_url)
            .with_http_timeout(Duration::from_secs(self.http_timeout));
        if let Some(mirrors) = &self.mirrors {
            config = config.with_mirrors(
                mirrors
                    .iter()
                    .map(String::as_str)
                    .map(str::trim)
                    .filter(|m| !m.is_empty()),
            );
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zigdl_core::config::DEFAULT_MIRRORS;

    #[test]
    fn no_command_parses_to_none() {
        let cli = Cli::try_parse_from(["zigdl"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn download_takes_three_positionals() {
        let cli = Cli::try_parse_from(["zigdl", "download", "0.13.0", "zig.tar.xz", "zls.tar.xz"])
            .unwrap();
        match cli.command {
            Some(Commands::Download {
                version,
                zig_out,
                zls_out,
            }) => {
                assert_eq!(version, "0.13.0");
                assert_eq!(zig_out, PathBuf::from("zig.tar.xz"));
                assert_eq!(zls_out, PathBuf::from("zls.tar.xz"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["zigdl", "download", "0.13.0"]).is_err());
    }

    #[test]
    fn flags_override_config_defaults() {
        let cli = Cli::try_parse_from([
            "zigdl",
            "--index-url",
            "http://localhost/index.json",
            "--http-timeout",
            "5",
            "--mirror",
            "http://a/zig,http://b/zig",
            "latest-version",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.index_url, "http://localhost/index.json");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.mirrors, ["http://a/zig", "http://b/zig"]);
    }

    #[test]
    fn default_mirrors_when_unset() {
        let cli = Cli {
            index_url: DEFAULT_INDEX_URL.into(),
            http_timeout: DEFAULT_HTTP_TIMEOUT_SECS,
            mirrors: None,
            companion_url: DEFAULT_COMPANION_URL.into(),
            command: None,
        };
        assert_eq!(cli.config().mirrors, DEFAULT_MIRRORS);
    }
}
