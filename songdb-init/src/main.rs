//! songdb-init - Schema initializer
//!
//! Creates the database file and the `song` table if they are missing. Safe to
//! run any number of times; run it before starting `songdb-api`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use songdb_common::config::{Config, ConfigOverrides};
use tracing::{error, info, warn};

/// Command-line arguments for songdb-init
#[derive(Parser, Debug)]
#[command(name = "songdb-init")]
#[command(about = "Create the songdb schema if it does not exist")]
#[command(version)]
struct Args {
    /// TOML config file (defaults to the platform config directory)
    #[arg(short, long, env = "SONGDB_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "SONGDB_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&ConfigOverrides {
        config_file: args.config,
        database: args.database,
        ..ConfigOverrides::default()
    })
    .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .init();

    match &config.source {
        Some(path) => info!("Configuration: {}", path.display()),
        None => warn!("No config file found, using compiled defaults"),
    }

    let pool = match songdb_common::db::init_database(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Schema initialization failed: {}", e);
            return Err(e).context("Failed to initialize song database");
        }
    };
    pool.close().await;

    info!("✓ Schema ready at {}", config.database.path.display());
    Ok(())
}
