//! In-memory song collection
//!
//! The collection order is the server order reported to clients: seeded
//! songs first, newly created songs appended at the end.

use chrono::Utc;
use songlib_common::pagination::calculate_pagination;
use songlib_common::{CreateSongRequest, Song, SongsResponse, UpdateSongRequest};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Shared handle to the song collection
///
/// Cloning shares the underlying collection.
#[derive(Clone, Default)]
pub struct SongRepository {
    songs: Arc<RwLock<Vec<Song>>>,
}

impl SongRepository {
    pub fn new(songs: Vec<Song>) -> Self {
        Self {
            songs: Arc::new(RwLock::new(songs)),
        }
    }

    pub async fn len(&self) -> usize {
        self.songs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.songs.read().await.is_empty()
    }

    /// One page of songs plus its pagination window
    pub async fn list(&self, page: u32, limit: u32) -> SongsResponse {
        let songs = self.songs.read().await;
        let total = u32::try_from(songs.len()).unwrap_or(u32::MAX);
        let pagination = calculate_pagination(total, page, limit);

        let data = songs
            .iter()
            .skip(pagination.offset)
            .take(pagination.info.limit as usize)
            .cloned()
            .collect();

        SongsResponse {
            data,
            pagination: pagination.info,
        }
    }

    pub async fn get(&self, id: &str) -> Option<Song> {
        self.songs.read().await.iter().find(|s| s.id == id).cloned()
    }

    /// Store a new song with a fresh id and timestamps
    pub async fn create(&self, draft: CreateSongRequest) -> Song {
        let now = Utc::now();
        let song = Song {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            artist: draft.artist,
            album: draft.album,
            year: draft.year,
            genre: draft.genre,
            duration: draft.duration,
            created_at: now,
            updated_at: now,
        };
        self.songs.write().await.push(song.clone());
        song
    }

    /// Merge `changes` into the song with `id`; `None` if it does not exist
    pub async fn update(&self, id: &str, changes: &UpdateSongRequest) -> Option<Song> {
        let mut songs = self.songs.write().await;
        let song = songs.iter_mut().find(|s| s.id == id)?;
        changes.apply_to(song);
        song.updated_at = Utc::now();
        Some(song.clone())
    }

    /// Remove the song with `id`; false if it does not exist
    pub async fn delete(&self, id: &str) -> bool {
        let mut songs = self.songs.write().await;
        match songs.iter().position(|s| s.id == id) {
            Some(index) => {
                songs.remove(index);
                true
            }
            None => false,
        }
    }
}
