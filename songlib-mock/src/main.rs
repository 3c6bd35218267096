//! songlib-mock - Song catalog fixture backend
//!
//! Serves an in-memory, freshly seeded song catalog over HTTP so the
//! songlib client can be developed without a real server.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use songlib_mock::fixtures::{DEFAULT_RNG_SEED, DEFAULT_SEED_COUNT};
use songlib_mock::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for songlib-mock
#[derive(Parser, Debug)]
#[command(name = "songlib-mock")]
#[command(about = "In-memory song catalog backend for local development")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "SONGLIB_MOCK_PORT")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Number of fixture songs to seed
    #[arg(long, default_value_t = DEFAULT_SEED_COUNT)]
    seed_count: usize,

    /// RNG seed for fixture years and durations
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    rng_seed: u64,

    /// Artificial delay before answering each catalog request
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songlib_mock=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting songlib-mock v{} with {} fixture songs",
        env!("CARGO_PKG_VERSION"),
        args.seed_count
    );

    let state = AppState::seeded(args.seed_count, args.rng_seed)
        .with_latency(Duration::from_millis(args.latency_ms));
    if args.latency_ms > 0 {
        info!("Simulated latency: {}ms per request", args.latency_ms);
    }

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host/port")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("songlib-mock listening on http://{}/api", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
