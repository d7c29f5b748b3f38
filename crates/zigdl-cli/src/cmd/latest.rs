//! Latest-version command

use anyhow::{Context, Result};
use zigdl_core::Config;

pub async fn latest_version(config: &Config) -> Result<()> {
    let latest = super::installer(config)?
        .latest_version()
        .await
        .with_context(|| format!("Failed to resolve latest version from {}", config.index_url))?;
    println!("{latest}");
    Ok(())
}
