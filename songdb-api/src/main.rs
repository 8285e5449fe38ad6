//! songdb-api - Song catalogue HTTP service
//!
//! Serves CRUD endpoints over the `song` table created by `songdb-init`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use songdb_api::{build_router, AppState};
use songdb_common::config::{Config, ConfigOverrides};
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments for songdb-api
#[derive(Parser, Debug)]
#[command(name = "songdb-api")]
#[command(about = "Song catalogue HTTP API")]
#[command(version)]
struct Args {
    /// TOML config file (defaults to the platform config directory)
    #[arg(short, long, env = "SONGDB_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "SONGDB_DATABASE")]
    database: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "SONGDB_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SONGDB_PORT")]
    port: Option<u16>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_file: args.config,
            database: args.database,
            host: args.host,
            port: args.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let overrides: ConfigOverrides = Args::parse().into();
    let config = Config::load(&overrides).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .init();

    // Build identification first, before any database delay
    info!(
        "Starting songdb-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config.source {
        Some(path) => info!("Configuration: {}", path.display()),
        None => warn!("No config file found, using compiled defaults"),
    }
    info!("Database path: {}", config.database.path.display());

    let pool = songdb_common::db::connect(&config.database)
        .await
        .context("Failed to open song database")?;
    info!("✓ Connected to database");

    let app = build_router(AppState::new(pool.clone()));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("songdb-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
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
            info!("Received terminate signal, shutting down");
        },
    }
}
