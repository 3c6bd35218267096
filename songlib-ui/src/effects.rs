//! Effect orchestrator
//!
//! One task owns the [`Store`]. Intents arriving through a [`CatalogHandle`]
//! are reduced immediately; their remote calls run as spawned tasks whose
//! outcomes come back through a done-channel. After every reduction the
//! new state is published on a watch channel.
//!
//! Fetches are latest-wins by generation (see [`Store::complete`]);
//! create/update/delete calls run independently and all apply.

use std::sync::Arc;

use songlib_common::{CreateSongRequest, UpdateSongRequest};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::{ApiError, SongsApi};
use crate::error::{Error, Result};
use crate::events::CatalogEvent;
use crate::store::{CatalogState, OperationKind, Store, Ticket};

const INTENT_CHANNEL_CAPACITY: usize = 64;
const REPORT_CHANNEL_CAPACITY: usize = 100;

/// A remote call to perform on behalf of an intent
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch { page: u32, limit: u32 },
    Create(CreateSongRequest),
    Update { id: String, changes: UpdateSongRequest },
    Delete(String),
}

impl Effect {
    /// Remote call requested by `event`; `None` for non-intents
    pub fn from_intent(event: &CatalogEvent) -> Option<Self> {
        match event {
            CatalogEvent::FetchRequested { page, limit } => Some(Effect::Fetch {
                page: *page,
                limit: *limit,
            }),
            CatalogEvent::CreateRequested(draft) => Some(Effect::Create(draft.clone())),
            CatalogEvent::UpdateRequested { id, changes } => Some(Effect::Update {
                id: id.clone(),
                changes: changes.clone(),
            }),
            CatalogEvent::DeleteRequested(id) => Some(Effect::Delete(id.clone())),
            _ => None,
        }
    }

    /// Perform the call and turn the result into an outcome event
    pub async fn run(self, api: &dyn SongsApi) -> CatalogEvent {
        match self {
            Effect::Fetch { page, limit } => match api.list_songs(page, limit).await {
                Ok(response) => CatalogEvent::FetchSucceeded(response),
                Err(e) => CatalogEvent::FetchFailed(failure_message(e, "Failed to fetch songs")),
            },
            Effect::Create(draft) => match api.create_song(&draft).await {
                Ok(song) => CatalogEvent::CreateSucceeded(song),
                Err(e) => CatalogEvent::CreateFailed(failure_message(e, "Failed to create song")),
            },
            Effect::Update { id, changes } => match api.update_song(&id, &changes).await {
                Ok(song) => CatalogEvent::UpdateSucceeded(song),
                Err(e) => CatalogEvent::UpdateFailed(failure_message(e, "Failed to update song")),
            },
            Effect::Delete(id) => match api.delete_song(&id).await {
                Ok(()) => CatalogEvent::DeleteSucceeded(id),
                Err(e) => CatalogEvent::DeleteFailed(failure_message(e, "Failed to delete song")),
            },
        }
    }
}

fn failure_message(error: ApiError, fallback: &str) -> String {
    if error.message.is_empty() {
        fallback.to_string()
    } else {
        error.message
    }
}

/// What happened to a finished remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectReport {
    pub kind: OperationKind,
    /// Fetch generation, `None` for create/update/delete
    pub generation: Option<u64>,
    /// False when the outcome was discarded as superseded
    pub applied: bool,
}

/// Cloneable front door to a running orchestrator
#[derive(Clone)]
pub struct CatalogHandle {
    intents: mpsc::Sender<CatalogEvent>,
    snapshots: watch::Receiver<CatalogState>,
    reports: broadcast::Sender<EffectReport>,
}

impl CatalogHandle {
    /// Queue an intent or local event
    pub async fn dispatch(&self, event: CatalogEvent) -> Result<()> {
        self.intents.send(event).await.map_err(|_| Error::Closed)
    }

    /// Latest published state
    pub fn snapshot(&self) -> CatalogState {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every reduction
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.snapshots.clone()
    }

    /// Reports for every remote operation completed after this call
    pub fn reports(&self) -> broadcast::Receiver<EffectReport> {
        self.reports.subscribe()
    }
}

struct Orchestrator {
    api: Arc<dyn SongsApi>,
    store: Store,
    intents: mpsc::Receiver<CatalogEvent>,
    done_tx: mpsc::UnboundedSender<(Ticket, CatalogEvent)>,
    done_rx: mpsc::UnboundedReceiver<(Ticket, CatalogEvent)>,
    snapshots: watch::Sender<CatalogState>,
    reports: broadcast::Sender<EffectReport>,
}

/// Start the orchestrator task
///
/// The task stops once every [`CatalogHandle`] has been dropped. Remote
/// calls still running at that point finish on their own and are ignored.
pub fn spawn_orchestrator(api: Arc<dyn SongsApi>) -> (CatalogHandle, JoinHandle<()>) {
    let (intent_tx, intent_rx) = mpsc::channel(INTENT_CHANNEL_CAPACITY);
    let (done_tx, done_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(CatalogState::default());
    let (report_tx, _) = broadcast::channel(REPORT_CHANNEL_CAPACITY);

    let orchestrator = Orchestrator {
        api,
        store: Store::new(),
        intents: intent_rx,
        done_tx,
        done_rx,
        snapshots: snapshot_tx,
        reports: report_tx.clone(),
    };

    let task = tokio::spawn(orchestrator.run());

    let handle = CatalogHandle {
        intents: intent_tx,
        snapshots: snapshot_rx,
        reports: report_tx,
    };
    (handle, task)
}

impl Orchestrator {
    async fn run(mut self) {
        debug!("Catalog orchestrator started");

        loop {
            tokio::select! {
                intent = self.intents.recv() => match intent {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                Some((ticket, outcome)) = self.done_rx.recv() => {
                    self.handle_outcome(ticket, outcome);
                }
            }
        }

        let pending = self.store.in_flight();
        if pending > 0 {
            info!(pending, "Catalog orchestrator stopped with operations in flight");
        } else {
            debug!("Catalog orchestrator stopped");
        }
    }

    fn handle_event(&mut self, event: CatalogEvent) {
        if event.is_outcome() {
            warn!(event = event.name(), "Ignoring outcome event dispatched as an intent");
            return;
        }

        if !event.is_intent() {
            debug!(event = event.name(), "Local event");
            self.store.dispatch(event);
            self.publish();
            return;
        }

        debug!(event = event.name(), "Intent received");
        let effect = Effect::from_intent(&event);
        let ticket = self.store.dispatch(event);

        if let (Some(effect), Some(ticket)) = (effect, ticket) {
            self.spawn_effect(effect, ticket);
        }
        self.publish();
    }

    fn spawn_effect(&self, effect: Effect, ticket: Ticket) {
        let api = Arc::clone(&self.api);
        let done_tx = self.done_tx.clone();

        tokio::spawn(async move {
            let outcome = effect.run(api.as_ref()).await;
            // Receiver gone means the orchestrator shut down
            let _ = done_tx.send((ticket, outcome));
        });
    }

    fn handle_outcome(&mut self, ticket: Ticket, outcome: CatalogEvent) {
        let name = outcome.name();
        if let CatalogEvent::FetchFailed(message)
        | CatalogEvent::CreateFailed(message)
        | CatalogEvent::UpdateFailed(message)
        | CatalogEvent::DeleteFailed(message) = &outcome
        {
            warn!(event = name, message = %message, "Remote operation failed");
        }

        let applied = self.store.complete(ticket, outcome);
        if applied {
            debug!(event = name, in_flight = self.store.in_flight(), "Outcome applied");
            self.publish();
        }

        // No subscribers is fine
        let _ = self.reports.send(EffectReport {
            kind: ticket.kind,
            generation: ticket.generation,
            applied,
        });
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.store.state().clone());
    }
}
