//! songdb-api library - song catalogue HTTP service
//!
//! Five CRUD endpoints over the `song` table plus a health check. Handlers
//! share nothing but the connection pool.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; handlers borrow one connection per request
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/songs", get(api::list_songs).post(api::create_song))
        .route(
            "/songs/:id",
            get(api::get_song)
                .put(api::update_song)
                .delete(api::delete_song),
        )
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser front ends are served from a different origin
        .layer(CorsLayer::permissive())
}
