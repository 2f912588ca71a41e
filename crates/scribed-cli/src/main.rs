//! CLI entry point.
//!
//! Parses flags, initializes tracing, and hands off to the web adapter's
//! composition root.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scribed_axum::bootstrap::{DEFAULT_PORT, ServerConfig, start_server};

/// Web control panel for the faster-whisper-hotkey transcription worker.
#[derive(Debug, Parser)]
#[command(name = "scribed", version, about)]
struct Cli {
    /// Port to serve the panel on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Worker executable to supervise (resolved through PATH by default).
    #[arg(long)]
    worker: Option<PathBuf>,

    /// Panel settings file location.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = ServerConfig::with_defaults();
    config.port = cli.port;
    if let Some(worker) = cli.worker {
        config.worker_program = worker;
    }
    if let Some(path) = cli.config {
        config.settings_path = path;
    }

    start_server(config).await
}
