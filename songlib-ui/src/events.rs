//! Catalog events
//!
//! Intent events ask for a remote operation; outcome events report how it
//! ended. Modal and error events are purely local.

use songlib_common::pagination::DEFAULT_PAGE_SIZE;
use songlib_common::{CreateSongRequest, Song, SongsResponse, UpdateSongRequest};

/// Which dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit,
    View,
}

impl ModalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalMode::Create => "create",
            ModalMode::Edit => "edit",
            ModalMode::View => "view",
        }
    }
}

/// Everything that may change [`crate::store::CatalogState`]
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    FetchRequested { page: u32, limit: u32 },
    FetchSucceeded(SongsResponse),
    FetchFailed(String),

    CreateRequested(CreateSongRequest),
    CreateSucceeded(Song),
    CreateFailed(String),

    UpdateRequested { id: String, changes: UpdateSongRequest },
    UpdateSucceeded(Song),
    UpdateFailed(String),

    DeleteRequested(String),
    DeleteSucceeded(String),
    DeleteFailed(String),

    OpenModal { mode: ModalMode, song: Option<Song> },
    CloseModal,
    ClearError,
}

impl CatalogEvent {
    /// Fetch of the first page at the default page size
    pub fn fetch_first_page() -> Self {
        CatalogEvent::FetchRequested {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    /// True for events that start a remote operation
    pub fn is_intent(&self) -> bool {
        matches!(
            self,
            CatalogEvent::FetchRequested { .. }
                | CatalogEvent::CreateRequested(_)
                | CatalogEvent::UpdateRequested { .. }
                | CatalogEvent::DeleteRequested(_)
        )
    }

    /// True for events reporting the end of a remote operation
    pub fn is_outcome(&self) -> bool {
        matches!(
            self,
            CatalogEvent::FetchSucceeded(_)
                | CatalogEvent::FetchFailed(_)
                | CatalogEvent::CreateSucceeded(_)
                | CatalogEvent::CreateFailed(_)
                | CatalogEvent::UpdateSucceeded(_)
                | CatalogEvent::UpdateFailed(_)
                | CatalogEvent::DeleteSucceeded(_)
                | CatalogEvent::DeleteFailed(_)
        )
    }

    /// Short event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            CatalogEvent::FetchRequested { .. } => "fetch-requested",
            CatalogEvent::FetchSucceeded(_) => "fetch-succeeded",
            CatalogEvent::FetchFailed(_) => "fetch-failed",
            CatalogEvent::CreateRequested(_) => "create-requested",
            CatalogEvent::CreateSucceeded(_) => "create-succeeded",
            CatalogEvent::CreateFailed(_) => "create-failed",
            CatalogEvent::UpdateRequested { .. } => "update-requested",
            CatalogEvent::UpdateSucceeded(_) => "update-succeeded",
            CatalogEvent::UpdateFailed(_) => "update-failed",
            CatalogEvent::DeleteRequested(_) => "delete-requested",
            CatalogEvent::DeleteSucceeded(_) => "delete-succeeded",
            CatalogEvent::DeleteFailed(_) => "delete-failed",
            CatalogEvent::OpenModal { .. } => "open-modal",
            CatalogEvent::CloseModal => "close-modal",
            CatalogEvent::ClearError => "clear-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_classes_are_disjoint() {
        let events = [
            CatalogEvent::fetch_first_page(),
            CatalogEvent::FetchFailed("x".into()),
            CatalogEvent::DeleteRequested("1".into()),
            CatalogEvent::DeleteSucceeded("1".into()),
            CatalogEvent::CloseModal,
            CatalogEvent::ClearError,
        ];

        for event in &events {
            assert!(!(event.is_intent() && event.is_outcome()), "{}", event.name());
        }
        assert!(!CatalogEvent::CloseModal.is_intent());
        assert!(!CatalogEvent::CloseModal.is_outcome());
    }

    #[test]
    fn test_fetch_first_page_defaults() {
        assert_eq!(
            CatalogEvent::fetch_first_page(),
            CatalogEvent::FetchRequested { page: 1, limit: 10 }
        );
    }
}
