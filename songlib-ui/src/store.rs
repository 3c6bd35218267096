//! Catalog state store
//!
//! [`reduce`] is the pure transition function. [`Store`] owns the single
//! [`CatalogState`] document and adds the bookkeeping the reducer cannot
//! see: which fetch is the latest one and how many remote operations are
//! still outstanding.

use songlib_common::{PaginationInfo, Song};
use tracing::debug;

use crate::events::{CatalogEvent, ModalMode};

/// The catalog document rendered by the presentation layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    /// Current page in server order; locally created songs are prepended
    pub songs: Vec<Song>,
    /// `None` until the first successful fetch
    pub pagination: Option<PaginationInfo>,
    pub loading: bool,
    pub error: Option<String>,
    /// Song shown by an `Edit` or `View` dialog
    pub selected_song: Option<Song>,
    /// Open dialog; `None` means closed
    pub modal: Option<ModalMode>,
    /// Dialogs opened so far; lets a form owner tell whether its own open
    /// has been applied
    pub modal_opens: u64,
}

impl CatalogState {
    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn modal_mode(&self) -> Option<ModalMode> {
        self.modal
    }
}

/// Apply one event to the state
///
/// Total and side-effect free. Outcome events are applied as given; deciding
/// whether an outcome is still wanted is the [`Store`]'s job.
pub fn reduce(mut state: CatalogState, event: CatalogEvent) -> CatalogState {
    match event {
        CatalogEvent::FetchRequested { .. }
        | CatalogEvent::CreateRequested(_)
        | CatalogEvent::UpdateRequested { .. }
        | CatalogEvent::DeleteRequested(_) => {
            state.loading = true;
            state.error = None;
        }

        CatalogEvent::FetchSucceeded(response) => {
            state.loading = false;
            state.error = None;
            state.songs = response.data;
            state.pagination = Some(response.pagination);
        }

        CatalogEvent::CreateSucceeded(song) => {
            state.loading = false;
            state.error = None;
            state.songs.insert(0, song);
            state.modal = None;
            state.selected_song = None;
        }

        CatalogEvent::UpdateSucceeded(song) => {
            state.loading = false;
            state.error = None;
            if let Some(existing) = state.songs.iter_mut().find(|s| s.id == song.id) {
                *existing = song;
            }
            state.modal = None;
            state.selected_song = None;
        }

        CatalogEvent::DeleteSucceeded(id) => {
            state.loading = false;
            state.error = None;
            if let Some(index) = state.songs.iter().position(|s| s.id == id) {
                state.songs.remove(index);
            }
        }

        CatalogEvent::FetchFailed(message)
        | CatalogEvent::CreateFailed(message)
        | CatalogEvent::UpdateFailed(message)
        | CatalogEvent::DeleteFailed(message) => {
            state.loading = false;
            state.error = Some(message);
        }

        CatalogEvent::OpenModal { mode, song } => {
            state.modal = Some(mode);
            state.modal_opens += 1;
            state.selected_song = match mode {
                ModalMode::Create => None,
                ModalMode::Edit | ModalMode::View => song,
            };
        }

        CatalogEvent::CloseModal => {
            state.modal = None;
            state.selected_song = None;
            state.error = None;
        }

        CatalogEvent::ClearError => {
            state.error = None;
        }
    }
    state
}

/// Kind of remote operation an intent starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Fetch,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// Operation started by `event`, if it is an intent
    pub fn of(event: &CatalogEvent) -> Option<Self> {
        match event {
            CatalogEvent::FetchRequested { .. } => Some(OperationKind::Fetch),
            CatalogEvent::CreateRequested(_) => Some(OperationKind::Create),
            CatalogEvent::UpdateRequested { .. } => Some(OperationKind::Update),
            CatalogEvent::DeleteRequested(_) => Some(OperationKind::Delete),
            _ => None,
        }
    }
}

/// Receipt for an accepted intent; hand it back with the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: OperationKind,
    /// Fetch generation; `None` for create/update/delete
    pub generation: Option<u64>,
}

/// Single owner of the catalog document
#[derive(Debug, Default)]
pub struct Store {
    state: CatalogState,
    fetch_generation: u64,
    fetch_pending: bool,
    in_flight: usize,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Remote operations accepted but not yet completed
    ///
    /// Superseded fetches are not counted.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Generation of the most recent fetch intent
    pub fn fetch_generation(&self) -> u64 {
        self.fetch_generation
    }

    /// Apply an intent or a local event
    ///
    /// Intents return the [`Ticket`] the outcome must be completed with.
    /// Outcome events are ignored here; they go through [`Store::complete`].
    pub fn dispatch(&mut self, event: CatalogEvent) -> Option<Ticket> {
        if event.is_outcome() {
            debug!(event = event.name(), "Outcome dispatched without a ticket, ignoring");
            return None;
        }

        let ticket = OperationKind::of(&event).map(|kind| self.issue(kind));
        self.reduce(event);
        ticket
    }

    /// Apply the outcome of the operation `ticket` was issued for
    ///
    /// Returns false when the outcome belongs to a superseded fetch and was
    /// discarded.
    pub fn complete(&mut self, ticket: Ticket, outcome: CatalogEvent) -> bool {
        if ticket.kind == OperationKind::Fetch {
            if ticket.generation != Some(self.fetch_generation) {
                debug!(
                    generation = ?ticket.generation,
                    latest = self.fetch_generation,
                    "Discarding superseded fetch result"
                );
                return false;
            }
            self.fetch_pending = false;
        }

        self.in_flight = self.in_flight.saturating_sub(1);
        self.reduce(outcome);
        true
    }

    fn issue(&mut self, kind: OperationKind) -> Ticket {
        match kind {
            OperationKind::Fetch => {
                self.fetch_generation += 1;
                // A newer fetch takes over the slot of a pending one
                if !self.fetch_pending {
                    self.fetch_pending = true;
                    self.in_flight += 1;
                }
                Ticket {
                    kind,
                    generation: Some(self.fetch_generation),
                }
            }
            _ => {
                self.in_flight += 1;
                Ticket {
                    kind,
                    generation: None,
                }
            }
        }
    }

    fn reduce(&mut self, event: CatalogEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
        if self.in_flight > 0 {
            self.state.loading = true;
        }
    }
}
