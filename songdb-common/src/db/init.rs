//! Database connection and schema initialization
//!
//! The schema initializer calls [`init_database`], which may create the
//! database file and the `song` table. The API service calls [`connect`],
//! which only opens an existing database and checks the table is there.

use crate::config::DatabaseConfig;
use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

/// Name of the single table managed by songdb
pub const SONG_TABLE: &str = "song";

/// Open (creating if needed) the configured database and ensure the `song` table exists
///
/// Idempotent: running it against an initialized database changes nothing.
pub async fn init_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    let newly_created = !config.path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(config).create_if_missing(true))
        .await?;

    if newly_created {
        info!("Initialized new database: {}", config.path.display());
    } else {
        info!("Opened existing database: {}", config.path.display());
    }

    let mut conn = pool.acquire().await?;
    create_song_table(&mut conn).await?;

    Ok(pool)
}

/// Open an existing, initialized database for request handling
///
/// Fails with [`Error::NotInitialized`] when the file or the `song` table is
/// missing, rather than creating an empty database the service can't use.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    if !config.path.exists() {
        return Err(Error::NotInitialized(format!(
            "{} does not exist; run songdb-init first",
            config.path.display()
        )));
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(connect_options(config))
        .await?;

    if !song_table_exists(&pool).await? {
        return Err(Error::NotInitialized(format!(
            "table '{}' missing in {}; run songdb-init first",
            SONG_TABLE,
            config.path.display()
        )));
    }

    Ok(pool)
}

/// Per-connection settings shared by both entry points
///
/// Pragmas go through the connect options so every pooled connection gets
/// them, not just the first one.
fn connect_options(config: &DatabaseConfig) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(&config.path)
        .busy_timeout(config.busy_timeout())
        .foreign_keys(true)
}

/// Create the song table
///
/// Length limits are CHECK constraints so over-long values are rejected by
/// storage, like a strict-mode VARCHAR column.
pub async fn create_song_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS song (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR(255) NOT NULL CHECK (length(title) <= 255),
            artist VARCHAR(255) NOT NULL CHECK (length(artist) <= 255),
            album VARCHAR(255) CHECK (album IS NULL OR length(album) <= 255),
            duration INTEGER,
            file_url VARCHAR(1024) NOT NULL CHECK (length(file_url) <= 1024),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    info!("Song table ready");
    Ok(())
}

/// Check whether the `song` table is present
pub async fn song_table_exists(pool: &SqlitePool) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(SONG_TABLE)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}
