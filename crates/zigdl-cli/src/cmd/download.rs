//! Download command

use std::path::Path;

use anyhow::{Context, Result};
use zigdl_core::Config;

/// Fetch Zig `version` to `zig_out` and the matching ZLS to `zls_out`.
pub async fn download(config: &Config, version: &str, zig_out: &Path, zls_out: &Path) -> Result<()> {
    let outcome = super::installer(config)?
        .download(version, zig_out, zls_out)
        .await
        .with_context(|| format!("Failed to download Zig {version}"))?;

    tracing::info!(
        platform = %outcome.platform,
        from = %outcome.primary.url,
        bytes = outcome.primary.bytes,
        "Zig {version} saved to {}",
        zig_out.display()
    );
    match outcome.companion {
        Some(zls) => tracing::info!(
            from = %zls.url,
            bytes = zls.bytes,
            "ZLS saved to {}",
            zls_out.display()
        ),
        None => tracing::info!("No ZLS build for {}", outcome.platform),
    }
    Ok(())
}
