//! Presentation helpers for the terminal shell
//!
//! Everything here is synchronous and works on snapshots; nothing in this
//! module talks to the orchestrator.

pub mod filter;
pub mod form;
pub mod pager;
pub mod render;

pub use filter::filter_songs;
pub use form::{FormField, SongForm};
pub use pager::{visible_pages, PageItem};
