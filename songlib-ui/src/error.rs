//! Error types for songlib-ui
//!
//! Remote failures never surface here; they travel as `*-failed` events
//! carrying an [`ApiError`](crate::client::ApiError) message.

use thiserror::Error;

/// Client-side errors
#[derive(Debug, Error)]
pub enum Error {
    /// The orchestrator task is no longer running
    #[error("Catalog orchestrator stopped")]
    Closed,
}

pub type Result<T> = std::result::Result<T, Error>;
