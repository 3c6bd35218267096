//! songlib-mock library - in-memory fixture backend
//!
//! Simulates the song catalog REST service for local development. Nothing
//! is persisted; every process starts from freshly seeded fixtures.

use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub mod api;
pub mod error;
pub mod fixtures;
pub mod repository;

pub use error::{ApiError, ApiResult};
pub use repository::SongRepository;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Song collection
    pub songs: SongRepository,
    /// Artificial delay applied before answering each catalog request
    pub latency: Duration,
}

impl AppState {
    /// Create new application state
    pub fn new(songs: SongRepository) -> Self {
        Self {
            songs,
            latency: Duration::ZERO,
        }
    }

    /// State seeded with `count` fixture songs
    pub fn seeded(count: usize, rng_seed: u64) -> Self {
        Self::new(SongRepository::new(fixtures::seed_songs(count, rng_seed)))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Build application router
///
/// Catalog routes live under `/api`; `/health` sits at the root.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let songs = Router::new()
        .route("/songs", get(api::list_songs).post(api::create_song))
        .route(
            "/songs/:id",
            get(api::get_song)
                .put(api::update_song)
                .delete(api::delete_song),
        );

    Router::new()
        .nest("/api", songs)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser clients on other origins
        .layer(CorsLayer::permissive())
}

/// Serve on an OS-assigned localhost port in a background task
///
/// Returns the bound address; the catalog base URL is `http://{addr}/api`.
pub async fn serve_ephemeral(state: AppState) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = build_router(state);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Mock backend stopped: {}", e);
        }
    });

    info!("songlib-mock listening on http://{}", addr);
    Ok((addr, handle))
}
