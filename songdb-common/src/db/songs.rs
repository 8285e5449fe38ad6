//! Song table statements
//!
//! One function per SQL statement. Callers pass a borrowed connection so that
//! a write and its read-back run on the same connection; nothing here opens a
//! transaction.

use sqlx::SqliteConnection;

use super::models::{Song, SongPayload};
use crate::Result;

const SELECT_COLUMNS: &str = "SELECT id, title, artist, album, duration, file_url, created_at FROM song";

/// All songs, newest (highest id) first
pub async fn list_songs(conn: &mut SqliteConnection) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>(&format!("{SELECT_COLUMNS} ORDER BY id DESC"))
        .fetch_all(&mut *conn)
        .await?;
    Ok(songs)
}

/// Song by id, `None` when no row matches
pub async fn get_song(conn: &mut SqliteConnection, id: i64) -> Result<Option<Song>> {
    let song = sqlx::query_as::<_, Song>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(song)
}

/// Insert a row and return its generated id
pub async fn insert_song(conn: &mut SqliteConnection, payload: &SongPayload) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO song (title, artist, album, duration, file_url) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&payload.title)
    .bind(&payload.artist)
    .bind(&payload.album)
    .bind(payload.duration)
    .bind(&payload.file_url)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every mutable column of the row with `id`
///
/// The affected-row count is deliberately not inspected: existence is decided
/// by the caller's read-back, so an update to identical values still counts.
pub async fn update_song(
    conn: &mut SqliteConnection,
    id: i64,
    payload: &SongPayload,
) -> Result<()> {
    sqlx::query(
        "UPDATE song SET title = ?, artist = ?, album = ?, duration = ?, file_url = ? WHERE id = ?",
    )
    .bind(&payload.title)
    .bind(&payload.artist)
    .bind(&payload.album)
    .bind(payload.duration)
    .bind(&payload.file_url)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Remove the row with `id` if present
pub async fn delete_song(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM song WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Insert then read the row back on the same connection
///
/// `None` means the row vanished between the two statements (concurrent delete).
pub async fn create_song(conn: &mut SqliteConnection, payload: &SongPayload) -> Result<Option<Song>> {
    let id = insert_song(conn, payload).await?;
    get_song(conn, id).await
}

/// Update then read the row back on the same connection
///
/// `None` means no row with `id` exists after the update.
pub async fn replace_song(
    conn: &mut SqliteConnection,
    id: i64,
    payload: &SongPayload,
) -> Result<Option<Song>> {
    update_song(conn, id, payload).await?;
    get_song(conn, id).await
}
