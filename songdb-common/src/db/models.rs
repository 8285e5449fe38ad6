//! Database models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One persisted row of the `song` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// Length in seconds
    pub duration: Option<i64>,
    /// Opaque reference to the audio file, never dereferenced
    pub file_url: String,
    /// Assigned by the database at insert (UTC)
    pub created_at: NaiveDateTime,
}

/// Client-supplied song fields for create and full-replace update
///
/// Server-owned fields (`id`, `created_at`) are not part of the payload, so
/// serde drops them if a client sends them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongPayload {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration: Option<i64>,
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_optional_fields_default_to_none() {
        let payload: SongPayload = serde_json::from_str(
            r#"{"title":"A","artist":"B","file_url":"http://x/a.mp3"}"#,
        )
        .unwrap();

        assert_eq!(payload.album, None);
        assert_eq!(payload.duration, None);
    }

    #[test]
    fn test_payload_ignores_server_fields() {
        let payload: SongPayload = serde_json::from_str(
            r#"{"id":42,"created_at":"2020-01-01T00:00:00","title":"A","artist":"B","file_url":"u"}"#,
        )
        .unwrap();

        assert_eq!(payload.title, "A");
    }

    #[test]
    fn test_payload_requires_title() {
        let result: Result<SongPayload, _> =
            serde_json::from_str(r#"{"artist":"B","file_url":"u"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_song_serializes_nulls_and_iso_timestamp() {
        let song = Song {
            id: 1,
            title: "A".to_string(),
            artist: "B".to_string(),
            album: None,
            duration: None,
            file_url: "http://x/a.mp3".to_string(),
            created_at: NaiveDateTime::parse_from_str("2026-10-18 09:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };

        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["album"], serde_json::Value::Null);
        assert_eq!(value["duration"], serde_json::Value::Null);
        assert_eq!(value["created_at"], "2026-10-18T09:30:00");
    }
}
