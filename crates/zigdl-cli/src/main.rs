//! zigdl - Zig toolchain fetcher

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zigdl_cli::cmd;
use zigdl_cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    match cli.command {
        None | Some(Commands::AllVersions) => cmd::versions::all_versions(&config).await,
        Some(Commands::LatestVersion) => cmd::latest::latest_version(&config).await,
        Some(Commands::Download {
            version,
            zig_out,
            zls_out,
        }) => cmd::download::download(&config, &version, &zig_out, &zls_out).await,
    }
}
