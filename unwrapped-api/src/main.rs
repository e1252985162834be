//! unwrapped-api - Collection service entry point
//!
//! Serves the year list, collection data and artist lookups for the
//! collection viewer, plus the raw collection files from the data directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unwrapped_api::{build_router, AppState};
use unwrapped_common::config::{CliOverrides, ConfigResolver};

/// Command-line arguments for unwrapped-api
#[derive(Parser, Debug)]
#[command(name = "unwrapped-api")]
#[command(about = "Collection year and artist lookup service")]
#[command(version)]
struct Args {
    /// Directory containing collection_<year>.json files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML config file (default: <config dir>/unwrapped/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        Self {
            data_dir: args.data_dir,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new(args.into())
        .resolve()
        .context("Failed to resolve configuration")?;

    // Initialize tracing
    let level = &config.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("unwrapped_api={level},unwrapped_common={level},tower_http=debug").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting unwrapped-api v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {}", config.data_dir.display());

    if !config.data_dir.is_dir() {
        warn!(
            "Data directory {} does not exist; /api/years will fail until it is created",
            config.data_dir.display()
        );
    }

    let app = build_router(AppState::new(config.data_dir.clone()));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("unwrapped-api listening on http://{}", addr);
    info!("Years: http://{}/api/years", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
