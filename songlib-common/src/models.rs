//! Song catalog data model
//!
//! These types are the JSON wire format shared by the client and the mock
//! backend. Keys are camelCase on the wire (`createdAt`, `totalPages`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry as stored by the remote service
///
/// `id`, `created_at` and `updated_at` are assigned by the service and never
/// by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Opaque unique identifier
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: i32,
    /// Free-form genre; the editing form restricts it to [`crate::genres::GENRES`]
    pub genre: String,
    /// Length in whole seconds
    pub duration: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /songs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSongRequest {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: i32,
    pub genre: String,
    pub duration: u32,
}

impl CreateSongRequest {
    /// Names of the mandatory text fields that are blank
    ///
    /// Title, artist, album and genre must be present before a draft may be
    /// submitted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.artist.trim().is_empty() {
            missing.push("artist");
        }
        if self.album.trim().is_empty() {
            missing.push("album");
        }
        if self.genre.trim().is_empty() {
            missing.push("genre");
        }
        missing
    }
}

/// Body of `PUT /songs/{id}`: every field optional, absent fields untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSongRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl UpdateSongRequest {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge the provided fields into `song`
    ///
    /// Identity and timestamps are left alone; the caller refreshes
    /// `updated_at`.
    pub fn apply_to(&self, song: &mut Song) {
        if let Some(title) = &self.title {
            song.title = title.clone();
        }
        if let Some(artist) = &self.artist {
            song.artist = artist.clone();
        }
        if let Some(album) = &self.album {
            song.album = album.clone();
        }
        if let Some(year) = self.year {
            song.year = year;
        }
        if let Some(genre) = &self.genre {
            song.genre = genre.clone();
        }
        if let Some(duration) = self.duration {
            song.duration = duration;
        }
    }
}

impl From<CreateSongRequest> for UpdateSongRequest {
    fn from(draft: CreateSongRequest) -> Self {
        Self {
            title: Some(draft.title),
            artist: Some(draft.artist),
            album: Some(draft.album),
            year: Some(draft.year),
            genre: Some(draft.genre),
            duration: Some(draft.duration),
        }
    }
}

/// Page window over the full remote collection
///
/// Derived entirely by the remote service; read-only to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// Current page (1-based)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total item count
    pub total: u32,
    /// ceil(total / limit)
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Response of `GET /songs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongsResponse {
    pub data: Vec<Song>,
    pub pagination: PaginationInfo,
}

/// Error body returned by the remote service on non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_song() -> Song {
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        Song {
            id: "1".to_string(),
            title: "Test Song".to_string(),
            artist: "Test Artist".to_string(),
            album: "Test Album".to_string(),
            year: 2023,
            genre: "Rock".to_string(),
            duration: 180,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_song_uses_camel_case_keys() {
        let value = serde_json::to_value(sample_song()).unwrap();
        assert_eq!(value["createdAt"], "2023-01-01T00:00:00Z");
        assert_eq!(value["updatedAt"], "2023-01-01T00:00:00Z");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_pagination_wire_format() {
        let value = json!({
            "page": 2,
            "limit": 10,
            "total": 50,
            "totalPages": 5,
            "hasNext": true,
            "hasPrev": true
        });
        let info: PaginationInfo = serde_json::from_value(value).unwrap();
        assert_eq!(info.total_pages, 5);
        assert!(info.has_next && info.has_prev);
    }

    #[test]
    fn test_update_request_omits_absent_fields() {
        let update = UpdateSongRequest {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "title": "Renamed" }));
    }

    #[test]
    fn test_update_request_apply_merges_only_provided_fields() {
        let mut song = sample_song();
        let update = UpdateSongRequest {
            artist: Some("Someone Else".to_string()),
            duration: Some(240),
            ..Default::default()
        };
        update.apply_to(&mut song);

        assert_eq!(song.id, "1");
        assert_eq!(song.title, "Test Song");
        assert_eq!(song.artist, "Someone Else");
        assert_eq!(song.duration, 240);
    }

    #[test]
    fn test_missing_fields_reports_blank_text_fields() {
        let draft = CreateSongRequest {
            title: "Title".to_string(),
            artist: "  ".to_string(),
            album: String::new(),
            year: 2020,
            genre: "Jazz".to_string(),
            duration: 0,
        };
        assert_eq!(draft.missing_fields(), vec!["artist", "album"]);
    }

    #[test]
    fn test_error_body_tolerates_missing_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message, "");
    }
}
