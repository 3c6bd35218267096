//! Song catalog REST client
//!
//! Talks to the catalog service at `{base_url}/songs`. Every failure is
//! reported as an [`ApiError`] carrying a display message and the HTTP
//! status (0 when the request never got a response). No retries, no caching.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use songlib_common::config::ClientConfig;
use songlib_common::{CreateSongRequest, ErrorBody, Song, SongsResponse, UpdateSongRequest};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("songlib/", env!("CARGO_PKG_VERSION"));

/// Message used when no usable response was received
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Message used when an error response carries an empty message
pub const API_ERROR_MESSAGE: &str = "API Error";

/// Remote call failure as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    /// HTTP status, or 0 for transport failures
    pub status: u16,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Transport failure (connection refused, timeout, unreadable response)
    pub fn network() -> Self {
        Self::new(NETWORK_ERROR_MESSAGE, 0)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16()
    }

    pub fn is_transport(&self) -> bool {
        self.status == 0
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Operations offered by the catalog service
#[async_trait]
pub trait SongsApi: Send + Sync {
    /// One page of songs; `page` and `limit` must be at least 1
    async fn list_songs(&self, page: u32, limit: u32) -> ApiResult<SongsResponse>;

    async fn get_song(&self, id: &str) -> ApiResult<Song>;

    /// Store a new song; the service assigns id and timestamps
    async fn create_song(&self, draft: &CreateSongRequest) -> ApiResult<Song>;

    /// Merge `changes` into an existing song
    async fn update_song(&self, id: &str, changes: &UpdateSongRequest) -> ApiResult<Song>;

    async fn delete_song(&self, id: &str) -> ApiResult<()>;
}

/// [`SongsApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpSongsApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpSongsApi {
    /// Build a client for `base_url` (e.g. `http://localhost:3000/api`)
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                warn!("Failed to build HTTP client: {}", e);
                ApiError::network()
            })?;

        Ok(Self {
            http_client,
            base_url: songlib_common::config::normalize_base_url(base_url),
        })
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn songs_url(&self) -> String {
        format!("{}/songs", self.base_url)
    }

    fn song_url(&self, id: &str) -> String {
        format!("{}/songs/{}", self.base_url, id)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<Response> {
        request.send().await.map_err(|e| {
            warn!(error = %e, "Request to catalog service failed");
            ApiError::network()
        })
    }
}

#[async_trait]
impl SongsApi for HttpSongsApi {
    async fn list_songs(&self, page: u32, limit: u32) -> ApiResult<SongsResponse> {
        if page < 1 || limit < 1 {
            return Err(ApiError::new(
                "Page and limit must be at least 1",
                StatusCode::BAD_REQUEST.as_u16(),
            ));
        }

        debug!(page, limit, "GET /songs");
        let response = self
            .send(
                self.http_client
                    .get(self.songs_url())
                    .query(&[("page", page), ("limit", limit)]),
            )
            .await?;
        decode_json(response, API_ERROR_MESSAGE).await
    }

    async fn get_song(&self, id: &str) -> ApiResult<Song> {
        debug!(id, "GET /songs/:id");
        let response = self.send(self.http_client.get(self.song_url(id))).await?;
        decode_json(response, API_ERROR_MESSAGE).await
    }

    async fn create_song(&self, draft: &CreateSongRequest) -> ApiResult<Song> {
        debug!(title = %draft.title, "POST /songs");
        let response = self
            .send(self.http_client.post(self.songs_url()).json(draft))
            .await?;
        decode_json(response, API_ERROR_MESSAGE).await
    }

    async fn update_song(&self, id: &str, changes: &UpdateSongRequest) -> ApiResult<Song> {
        debug!(id, "PUT /songs/:id");
        let response = self
            .send(self.http_client.put(self.song_url(id)).json(changes))
            .await?;
        decode_json(response, API_ERROR_MESSAGE).await
    }

    async fn delete_song(&self, id: &str) -> ApiResult<()> {
        debug!(id, "DELETE /songs/:id");
        let response = self.send(self.http_client.delete(self.song_url(id))).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(decode_error(response, "Failed to delete song").await)
        }
    }
}

/// Parse a 2xx JSON body, or turn the response into an [`ApiError`]
async fn decode_json<T: DeserializeOwned>(response: Response, fallback: &str) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(decode_error(response, fallback).await);
    }

    response.json::<T>().await.map_err(|e| {
        warn!(status = status.as_u16(), error = %e, "Unreadable response body");
        ApiError::new(NETWORK_ERROR_MESSAGE, status.as_u16())
    })
}

/// Error message from a `{message}` body
///
/// Empty message → `fallback`; no parseable body → "Network error".
async fn decode_error(response: Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody { message }) if message.is_empty() => fallback.to_string(),
        Ok(ErrorBody { message }) => message,
        Err(_) => NETWORK_ERROR_MESSAGE.to_string(),
    };

    debug!(status, message = %message, "Catalog service returned an error");
    ApiError::new(message, status)
}
