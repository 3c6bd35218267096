//! Song catalog REST endpoints
//!
//! - `GET    /api/songs?page&limit` → page of songs + pagination
//! - `GET    /api/songs/:id`        → one song | 404
//! - `POST   /api/songs`            → 201 created song
//! - `PUT    /api/songs/:id`        → merged song | 404
//! - `DELETE /api/songs/:id`        → 204 | 404

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use songlib_common::human_time::parse_leading_int;
use songlib_common::pagination::DEFAULT_PAGE_SIZE;
use songlib_common::{CreateSongRequest, Song, SongsResponse, UpdateSongRequest};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Raw query parameters for listing
///
/// Kept as strings so junk values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// Requested page; missing, unparseable or < 1 → 1
    pub fn page(&self) -> u32 {
        positive_or(self.page.as_deref(), 1)
    }

    /// Requested page size; missing, unparseable or < 1 → 10
    pub fn limit(&self) -> u32 {
        positive_or(self.limit.as_deref(), DEFAULT_PAGE_SIZE)
    }
}

fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(parse_leading_int)
        .filter(|v| *v >= 1)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(default)
}

/// GET /api/songs
pub async fn list_songs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<SongsResponse> {
    state.simulate_latency().await;
    Json(state.songs.list(query.page(), query.limit()).await)
}

/// GET /api/songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Song>> {
    state.simulate_latency().await;
    state
        .songs
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(ApiError::song_not_found)
}

/// POST /api/songs
pub async fn create_song(
    State(state): State<AppState>,
    body: Result<Json<CreateSongRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    let Json(draft) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Validation error: missing {}",
            missing.join(", ")
        )));
    }

    state.simulate_latency().await;
    let song = state.songs.create(draft).await;
    info!(id = %song.id, title = %song.title, "Created song");
    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /api/songs/:id
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateSongRequest>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let Json(changes) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state.simulate_latency().await;
    let song = state
        .songs
        .update(&id, &changes)
        .await
        .ok_or_else(ApiError::song_not_found)?;
    info!(id = %song.id, "Updated song");
    Ok(Json(song))
}

/// DELETE /api/songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.simulate_latency().await;
    if state.songs.delete(&id).await {
        info!(id = %id, "Deleted song");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::song_not_found())
    }
}
