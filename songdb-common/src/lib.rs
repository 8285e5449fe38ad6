//! # songdb Common Library
//!
//! Shared code for the songdb schema initializer and API service:
//! - Configuration loading (TOML file, environment, CLI overrides)
//! - Database connection setup and schema creation
//! - The `Song` model and its SQL statements

pub mod config;
pub mod db;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
