//! # Songlib Common Library
//!
//! Shared code for the songlib client and its mock backend:
//! - Song catalog data model and wire types
//! - Pagination math
//! - Duration display/parsing ("M:SS")
//! - Genre list used by the editing form
//! - Configuration resolution

pub mod config;
pub mod error;
pub mod genres;
pub mod human_time;
pub mod models;
pub mod pagination;

pub use error::{Error, Result};
pub use models::{CreateSongRequest, ErrorBody, PaginationInfo, Song, SongsResponse, UpdateSongRequest};
