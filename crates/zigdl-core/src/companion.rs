//! Companion tool (ZLS) selection.
//!
//! The ZLS release service answers "which ZLS build is fully compatible with
//! Zig X" with an object shaped like a single index entry. A missing platform
//! key in that answer is not an error here; the caller decides to skip.

use reqwest::Url;
use zigdl_schema::PlatformArtifactMap;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::io::http::HttpTransport;

/// Compatibility mode requested from the service.
const COMPATIBILITY: &str = "full";

#[derive(Debug, Clone)]
pub struct CompatibilityResolver<T> {
    transport: T,
    endpoint: String,
}

impl<T: HttpTransport> CompatibilityResolver<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            endpoint: config.companion_url.clone(),
        }
    }

    /// Query URL for `version`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUrl`] if the configured endpoint is not a URL.
    pub fn query_url(&self, version: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[("zig_version", version), ("compatibility", COMPATIBILITY)],
        )
        .map_err(|e| Error::InvalidUrl {
            url: self.endpoint.clone(),
            reason: e.to_string(),
        })
    }

    /// Artifacts of the ZLS build compatible with Zig `version`.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] or [`Error::Parse`] as for the version index.
    pub async fn resolve_companion(&self, version: &str) -> Result<PlatformArtifactMap> {
        let url = self.query_url(version)?;
        tracing::debug!(%url, "Querying companion compatibility");
        let body = self.transport.get(url.as_str()).await?;
        serde_json::from_slice(&body).map_err(|source| Error::Parse {
            url: url.to_string(),
            source,
        })
    }
}
