//! HTTP API handlers for songdb-api

pub mod health;
pub mod songs;

pub use health::health_routes;
pub use songs::{create_song, delete_song, get_song, list_songs, update_song};
