//! Download orchestration: Zig plus the matching ZLS build.

use std::path::Path;

use zigdl_schema::{CatalogError, PlatformKey, ReleaseVersion};

use crate::companion::CompatibilityResolver;
use crate::config::Config;
use crate::error::Result;
use crate::index::VersionIndex;
use crate::io::download::{MirrorPolicy, MirroredDownloader, Verified};
use crate::io::http::HttpTransport;
use crate::reporter::Reporter;

/// What a successful [`Installer::download`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub platform: PlatformKey,
    pub primary: Verified,
    /// `None` when the compatibility service has no build for the platform.
    pub companion: Option<Verified>,
}

/// Entry point used by the CLI for all three operations.
#[derive(Debug)]
pub struct Installer<T, R> {
    index: VersionIndex<T>,
    companion: CompatibilityResolver<T>,
    downloader: MirroredDownloader<T, R>,
    platform: Option<PlatformKey>,
}

impl<T: HttpTransport + Clone, R: Reporter> Installer<T, R> {
    pub fn new(config: &Config, transport: T, reporter: R) -> Self {
        Self {
            index: VersionIndex::new(transport.clone(), config),
            companion: CompatibilityResolver::new(transport.clone(), config),
            downloader: MirroredDownloader::new(transport, config, reporter),
            platform: None,
        }
    }

    /// Pin the platform key instead of resolving it from the host.
    pub fn with_platform(mut self, platform: PlatformKey) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Fix the mirror shuffle seed.
    pub fn with_mirror_seed(mut self, seed: u64) -> Self {
        self.downloader = self.downloader.with_seed(seed);
        self
    }

    /// All release versions, oldest first.
    ///
    /// # Errors
    ///
    /// Transport or parse failures fetching the index.
    pub async fn list_versions(&self) -> Result<Vec<ReleaseVersion>> {
        let catalog = self.index.fetch().await?;
        Ok(catalog.list_versions().into_iter().cloned().collect())
    }

    /// The newest release version.
    ///
    /// # Errors
    ///
    /// Transport or parse failures, or [`CatalogError::EmptyCatalog`].
    pub async fn latest_version(&self) -> Result<ReleaseVersion> {
        let catalog = self.index.fetch().await?;
        Ok(catalog.latest()?.clone())
    }

    /// Download Zig `version` to `primary_dest` (mirrors first) and, when
    /// the compatibility service has a build for this platform, ZLS to
    /// `companion_dest` (origin only).
    ///
    /// # Errors
    ///
    /// Any failure is fatal except a missing companion build: unknown
    /// version, unsupported platform, the final download error for either
    /// artifact, or a failed compatibility query.
    pub async fn download(
        &self,
        version: &str,
        primary_dest: &Path,
        companion_dest: &Path,
    ) -> Result<InstallOutcome> {
        let platform = self.platform.clone().unwrap_or_else(PlatformKey::resolve);

        let catalog = self.index.fetch().await?;
        if !catalog.contains(version) {
            return Err(CatalogError::UnknownVersion(version.to_string()).into());
        }

        let artifact = catalog.lookup_artifact(version, &platform)?;
        tracing::info!(version, %platform, "Downloading Zig");
        let primary = self
            .downloader
            .download(&artifact, primary_dest, MirrorPolicy::UseMirrors)
            .await?;

        // A failed compatibility query aborts the whole download; only a
        // missing platform entry is treated as "no companion".
        let links = self.companion.resolve_companion(version).await?;
        let Some(companion_artifact) = links.for_platform(&platform)? else {
            tracing::info!(version, %platform, "No compatible ZLS build, skipping");
            return Ok(InstallOutcome {
                platform,
                primary,
                companion: None,
            });
        };

        tracing::info!(
            zls_version = links.metadata("version").unwrap_or("unknown"),
            %platform,
            "Downloading ZLS"
        );
        let companion = self
            .downloader
            .download(&companion_artifact, companion_dest, MirrorPolicy::OriginOnly)
            .await?;

        Ok(InstallOutcome {
            platform,
            primary,
            companion: Some(companion),
        })
    }
}
