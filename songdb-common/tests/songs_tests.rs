//! Tests for the song table statements

use songdb_common::config::DatabaseConfig;
use songdb_common::db::songs::{
    create_song, delete_song, get_song, insert_song, list_songs, replace_song, update_song,
};
use songdb_common::db::{init_database, SongPayload};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Create temporary initialized database
///
/// Returns (TempDir, SqlitePool) - TempDir must be kept alive for duration of test
async fn create_test_db() -> (TempDir, SqlitePool) {
    let temp_dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        path: temp_dir.path().join("songdb.db"),
        ..DatabaseConfig::default()
    };
    let pool = init_database(&config).await.unwrap();
    (temp_dir, pool)
}

fn payload(title: &str) -> SongPayload {
    SongPayload {
        title: title.to_string(),
        artist: "Artist".to_string(),
        album: None,
        duration: None,
        file_url: format!("http://x/{}.mp3", title),
    }
}

#[tokio::test]
async fn test_create_then_get_returns_same_row() {
    let (_dir, pool) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let input = SongPayload {
        album: Some("Album".to_string()),
        duration: Some(215),
        ..payload("Intro")
    };
    let created = create_song(&mut conn, &input).await.unwrap().unwrap();

    assert_eq!(created.title, "Intro");
    assert_eq!(created.album.as_deref(), Some("Album"));
    assert_eq!(created.duration, Some(215));

    let fetched = get_song(&mut conn, created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn test_get_unknown_id_is_none() {
    let (_dir, pool) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    assert_eq!(get_song(&mut conn, 999).await.unwrap(), None);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (_dir, pool) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    assert!(list_songs(&mut conn).await.unwrap().is_empty());

    for title in ["one", "two", "three"] {
        insert_song(&mut conn, &payload(title)).await.unwrap();
    }

    let songs = list_songs(&mut conn).await.unwrap();
    let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["three", "two", "one"]);
    assert!(songs.windows(2).all(|w| w[0].id > w[1].id));
}

#[tokio::test]
async fn test_replace_overwrites_mutable_fields_only() {
    let (_dir, pool) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let original = create_song(
        &mut conn,
        &SongPayload {
            album: Some("Old".to_string()),
            duration: Some(100),
            ..payload("before")
        },
    )
    .await
    .unwrap()
    .unwrap();

    // Full replace: omitted optional fields become NULL
    let updated = replace_song(&mut conn, original.id, &payload("after"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.title, "after");
    assert_eq!(updated.file_url, "http://x/after.mp3");
    assert_eq!(updated.album, None);
    assert_eq!(updated.duration, None);
}

#[tokio::test]
async fn test_replace_with_identical_values_still_found() {
    let (_dir, pool) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let original = create_song(&mut conn, &payload("same")).await.unwrap().unwrap();
    let updated = replace_song(&mut conn, original.id, &payload("same"))
        .await
        .unwrap();

    assert_eq!(updated, Some(original));
}

#[tokio::test]
async fn test_replace_unknown_id_is_none_and_inserts_nothing() {
    let (_dir, pool) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    update_song(&mut conn, 42, &payload("ghost")).await.unwrap();
    assert_eq!(replace_song(&mut conn, 42, &payload("ghost")).await.unwrap(), None);
    assert!(list_songs(&mut conn).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_then_get_is_none() {
    let (_dir, pool) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let song = create_song(&mut conn, &payload("gone")).await.unwrap().unwrap();
    delete_song(&mut conn, song.id).await.unwrap();
    assert_eq!(get_song(&mut conn, song.id).await.unwrap(), None);

    // Deleting again (or an id never inserted) is not an error
    delete_song(&mut conn, song.id).await.unwrap();
    delete_song(&mut conn, 12345).await.unwrap();
}

#[tokio::test]
async fn test_over_long_title_is_database_error() {
    let (_dir, pool) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let result = insert_song(&mut conn, &payload(&"x".repeat(300))).await;
    assert!(matches!(result, Err(songdb_common::Error::Database(_))));
}
