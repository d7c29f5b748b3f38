//! All-versions command

use anyhow::{Context, Result};
use zigdl_core::Config;
use zigdl_schema::ReleaseVersion;

/// Print every release version on one line, oldest first.
pub async fn all_versions(config: &Config) -> Result<()> {
    let versions = super::installer(config)?
        .list_versions()
        .await
        .with_context(|| format!("Failed to list versions from {}", config.index_url))?;

    let line = versions
        .iter()
        .map(ReleaseVersion::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    println!("{line}");
    Ok(())
}
