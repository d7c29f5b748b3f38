//! Command implementations

pub mod download;
pub mod latest;
pub mod versions;

use anyhow::{Context, Result};
use zigdl_core::{Config, Installer, ReqwestTransport, TracingReporter};

/// Build the production installer for `config`.
pub fn installer(config: &Config) -> Result<Installer<ReqwestTransport, TracingReporter>> {
    let transport = ReqwestTransport::new(config).context("Failed to set up HTTP client")?;
    Ok(Installer::new(config, transport, TracingReporter))
}
