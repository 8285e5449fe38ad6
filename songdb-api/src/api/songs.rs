//! Song CRUD handlers
//!
//! Each handler borrows one pooled connection for the whole request. The
//! `PoolConnection` guard hands it back to the pool when it drops, on every
//! exit path.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Serialize;
use songdb_common::db::{songs, Song, SongPayload};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Body returned by DELETE
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// GET /songs
///
/// All songs, newest first. An empty table yields `[]`.
pub async fn list_songs(State(state): State<AppState>) -> ApiResult<Json<Vec<Song>>> {
    let mut conn = state.db.acquire().await?;
    let songs = songs::list_songs(&mut conn).await?;
    debug!("Listed {} songs", songs.len());
    Ok(Json(songs))
}

/// GET /songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Song>> {
    let Path(id) = id?;
    let mut conn = state.db.acquire().await?;

    songs::get_song(&mut conn, id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::song_not_found)
}

/// POST /songs
///
/// Inserts the payload and answers with the row read back by its new id.
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<SongPayload>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let Json(payload) = payload?;
    let mut conn = state.db.acquire().await?;

    // Insert and read-back are separate statements; a delete landing in
    // between surfaces as not-found.
    let song = songs::create_song(&mut conn, &payload)
        .await?
        .ok_or_else(ApiError::song_not_found)?;

    info!("Created song {} ({} - {})", song.id, song.artist, song.title);
    Ok(Json(song))
}

/// PUT /songs/:id
///
/// Full replace of every mutable field. Existence is decided by the read-back
/// after the update, not by the affected-row count.
pub async fn update_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SongPayload>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let mut conn = state.db.acquire().await?;

    let song = songs::replace_song(&mut conn, id, &payload)
        .await?
        .ok_or_else(ApiError::song_not_found)?;

    info!("Updated song {}", song.id);
    Ok(Json(song))
}

/// DELETE /songs/:id
///
/// Always acknowledges, whether or not a row was removed.
pub async fn delete_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = id?;
    let mut conn = state.db.acquire().await?;

    songs::delete_song(&mut conn, id).await?;

    info!("Deleted song {}", id);
    Ok(Json(DeleteResponse { ok: true }))
}
