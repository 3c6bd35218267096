//! # songlib-ui
//!
//! Client side of the song catalog:
//! - [`client`]: REST client for the catalog service
//! - [`store`]: catalog state document and its reducer
//! - [`effects`]: orchestrator turning intents into remote calls
//! - [`view`] and [`shell`]: terminal presentation layer

pub mod client;
pub mod effects;
pub mod error;
pub mod events;
pub mod shell;
pub mod store;
pub mod view;

pub use client::{ApiError, HttpSongsApi, SongsApi};
pub use effects::{spawn_orchestrator, CatalogHandle, EffectReport};
pub use error::{Error, Result};
pub use events::{CatalogEvent, ModalMode};
pub use store::{reduce, CatalogState, OperationKind, Store, Ticket};
