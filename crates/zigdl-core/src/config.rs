//! Runtime configuration shared by every component.
//!
//! A `Config` is built once (usually by the CLI from flags and environment
//! variables) and handed to each constructor. Nothing in this crate reads the
//! process environment.

use std::time::Duration;

/// Default location of the Zig download index.
pub const DEFAULT_INDEX_URL: &str = "https://ziglang.org/download/index.json";

/// Default ZLS version-selection endpoint.
pub const DEFAULT_COMPANION_URL: &str = "https://releases.zigtools.org/v1/zls/select-version";

/// Default per-request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Community mirrors serving the same tarballs as ziglang.org.
pub const DEFAULT_MIRRORS: &[&str] = &[
    "https://pkg.machengine.org/zig",
    "https://zigmirror.hryx.net/zig",
    "https://zig.linus.dev/zig",
    "https://fs.liujiacai.net/zigbuilds",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub index_url: String,
    pub companion_url: String,
    /// Applied as both the connect timeout and the per-read timeout.
    pub http_timeout: Duration,
    pub user_agent: String,
    /// Mirror base URLs. Never reordered in place; see
    /// [`MirroredDownloader`](crate::io::download::MirroredDownloader).
    pub mirrors: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            companion_url: DEFAULT_COMPANION_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: crate::USER_AGENT.to_string(),
            mirrors: DEFAULT_MIRRORS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into();
        self
    }

    pub fn with_companion_url(mut self, url: impl Into<String>) -> Self {
        self.companion_url = url.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_mirrors<I, S>(mut self, mirrors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mirrors = mirrors.into_iter().map(Into::into).collect();
        self
    }
}
