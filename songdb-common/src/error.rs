//! Common error types for songdb

use thiserror::Error;

/// Common result type for songdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the schema initializer and the API service
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database file or `song` table missing; the schema initializer has not run
    #[error("Database not initialized: {0}")]
    NotInitialized(String),
}
