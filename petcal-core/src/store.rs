//! Event local-state store.
//!
//! Holds the overlay document in memory and writes it through to a
//! [`KeyValueStore`] after every mutation. Mutations are visible immediately;
//! the durable copy settles in the background and is best-effort: write
//! failures are logged and never roll back or fail the mutation.
//!
//! A stored document that exists but can't be parsed is copied to
//! `<key>.corrupt` before anything overwrites it. If the document can't be
//! read at all (or the copy fails), the store runs in memory only and leaves
//! storage untouched for the rest of the process.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use crate::event_status::{EventStatus, StatusEntry};
use crate::local_state::EventLocalState;
use crate::petcal_config::PetcalConfig;
use crate::preset::ReminderPreset;
use crate::quiet_hours::QuietHours;
use crate::storage::{FileStore, KeyValueStore};

enum WriteOp {
    Persist(String),
    Flush(oneshot::Sender<()>),
}

pub struct EventStateStore {
    state: watch::Sender<EventLocalState>,
    writer: mpsc::UnboundedSender<WriteOp>,
    key: String,
}

impl EventStateStore {
    /// Load the document stored under `key` and start the background writer.
    ///
    /// Must be called from within a tokio runtime. A missing or unreadable
    /// document starts the store empty with default quiet hours.
    pub async fn open(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let loaded = load_state(kv.clone(), key.clone()).await;
        let (state, _) = watch::channel(loaded.state);
        let writer = spawn_writer(kv, key.clone(), loaded.writable);

        EventStateStore { state, writer, key }
    }

    /// Open the file-backed store described by `config`.
    pub async fn open_default(config: &PetcalConfig) -> Self {
        let kv = Arc::new(FileStore::new(config.data_path()));
        Self::open(kv, config.storage_key.clone()).await
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // Mutations

    /// Replace the reminder handles for an event. An empty list is kept as
    /// present-and-empty, unlike [`clear_reminder_ids`](Self::clear_reminder_ids).
    pub fn set_reminder_ids<I, S>(&self, event_id: &str, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        self.mutate(|state| state.set_reminder_ids(event_id, ids));
    }

    pub fn clear_reminder_ids(&self, event_id: &str) {
        self.mutate(|state| state.clear_reminder_ids(event_id));
    }

    pub fn mark_completed(&self, event_id: &str) {
        self.mark(event_id, EventStatus::Completed);
    }

    pub fn mark_cancelled(&self, event_id: &str) {
        self.mark(event_id, EventStatus::Cancelled);
    }

    pub fn mark_missed(&self, event_id: &str) {
        self.mark(event_id, EventStatus::Missed);
    }

    /// Overwrite the status of an event. Any status may follow any other.
    pub fn mark(&self, event_id: &str, status: EventStatus) {
        self.mutate(|state| state.set_status(event_id, status, Utc::now()));
    }

    /// Back to implicit `Pending`.
    pub fn reset_status(&self, event_id: &str) {
        self.mutate(|state| state.reset_status(event_id));
    }

    pub fn set_preset_selection(&self, event_id: &str, preset: ReminderPreset) {
        self.mutate(|state| state.set_preset_selection(event_id, preset));
    }

    pub fn clear_preset_selection(&self, event_id: &str) {
        self.mutate(|state| state.clear_preset_selection(event_id));
    }

    pub fn set_quiet_hours(&self, quiet_hours: QuietHours) {
        self.mutate(|state| state.quiet_hours = quiet_hours);
    }

    /// Remove status, reminder handles and preset for a deleted event.
    pub fn forget_event(&self, event_id: &str) {
        self.mutate(|state| state.forget(event_id));
    }

    // Queries

    pub fn status(&self, event_id: &str) -> EventStatus {
        self.state.borrow().status(event_id)
    }

    pub fn status_entry(&self, event_id: &str) -> Option<StatusEntry> {
        self.state.borrow().statuses.get(event_id).cloned()
    }

    pub fn reminder_ids(&self, event_id: &str) -> Option<Vec<String>> {
        self.state.borrow().reminder_ids.get(event_id).cloned()
    }

    pub fn preset_selection(&self, event_id: &str) -> Option<ReminderPreset> {
        self.state.borrow().preset_selections.get(event_id).cloned()
    }

    pub fn quiet_hours(&self) -> QuietHours {
        self.state.borrow().quiet_hours
    }

    pub fn event_ids_with_status(&self, status: EventStatus) -> Vec<String> {
        self.state.borrow().event_ids_with_status(status)
    }

    pub fn snapshot(&self) -> EventLocalState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every in-memory change.
    pub fn subscribe(&self) -> watch::Receiver<EventLocalState> {
        self.state.subscribe()
    }

    /// Wait until every mutation issued so far has been handed to the
    /// key-value store. Write failures are still only logged.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();

        if self.writer.send(WriteOp::Flush(done)).is_err() {
            warn!(key = %self.key, "Event state writer is gone, nothing to flush");
            return;
        }

        let _ = wait.await;
    }

    // Serialize and enqueue under the same lock as the change so writes keep
    // mutation order.
    fn mutate(&self, change: impl FnOnce(&mut EventLocalState)) {
        self.state.send_modify(|state| {
            change(state);

            match state.to_json() {
                Ok(json) => {
                    if self.writer.send(WriteOp::Persist(json)).is_err() {
                        warn!(key = %self.key, "Event state writer is gone, change not persisted");
                    }
                }
                Err(e) => warn!(key = %self.key, error = %e, "Failed to serialize event state"),
            }
        });
    }
}

struct Loaded {
    state: EventLocalState,
    /// False when writing could destroy a document we failed to read.
    writable: bool,
}

impl Loaded {
    fn fresh(writable: bool) -> Self {
        Loaded {
            state: EventLocalState::default(),
            writable,
        }
    }
}

pub fn corrupt_key(key: &str) -> String {
    format!("{key}.corrupt")
}

async fn load_state(kv: Arc<dyn KeyValueStore>, key: String) -> Loaded {
    let read_key = key.clone();
    let reader = kv.clone();
    let result = tokio::task::spawn_blocking(move || reader.get(&read_key)).await;

    let json = match result {
        Ok(Ok(Some(json))) => json,
        Ok(Ok(None)) => return Loaded::fresh(true),
        Ok(Err(e)) => {
            warn!(%key, error = %e, "Failed to load event state, changes will not be persisted");
            return Loaded::fresh(false);
        }
        Err(e) => {
            warn!(%key, error = %e, "Event state load task failed, changes will not be persisted");
            return Loaded::fresh(false);
        }
    };

    match EventLocalState::from_json(&json) {
        Ok(state) => Loaded {
            state,
            writable: true,
        },
        Err(e) => {
            let backup_key = corrupt_key(&key);
            warn!(%key, %backup_key, error = %e, "Stored event state is unreadable, starting empty");

            let write_key = backup_key.clone();
            let backup = tokio::task::spawn_blocking(move || kv.set(&write_key, &json)).await;

            match backup {
                Ok(Ok(())) => Loaded::fresh(true),
                Ok(Err(e)) => {
                    warn!(%backup_key, error = %e, "Could not back up unreadable event state, changes will not be persisted");
                    Loaded::fresh(false)
                }
                Err(e) => {
                    warn!(%backup_key, error = %e, "Event state backup task failed, changes will not be persisted");
                    Loaded::fresh(false)
                }
            }
        }
    }
}

/// Single writer so durable writes land in mutation order. Queued snapshots
/// are coalesced: only the newest one in a batch is written.
fn spawn_writer(
    kv: Arc<dyn KeyValueStore>,
    key: String,
    writable: bool,
) -> mpsc::UnboundedSender<WriteOp> {
    let (tx, mut rx) = mpsc::unbounded_channel::<WriteOp>();

    tokio::spawn(async move {
        while let Some(first) = rx.recv().await {
            let mut latest = None;
            let mut waiters = Vec::new();

            let mut next = Some(first);
            while let Some(op) = next {
                match op {
                    WriteOp::Persist(json) => latest = Some(json),
                    WriteOp::Flush(done) => waiters.push(done),
                }
                next = rx.try_recv().ok();
            }

            match latest {
                Some(json) if writable => persist(kv.clone(), key.clone(), json).await,
                Some(_) => debug!(%key, "Event state is memory-only, skipping write"),
                None => {}
            }

            for done in waiters {
                let _ = done.send(());
            }
        }
    });

    tx
}

async fn persist(kv: Arc<dyn KeyValueStore>, key: String, json: String) {
    let write_key = key.clone();
    let bytes = json.len();
    let result = tokio::task::spawn_blocking(move || kv.set(&write_key, &json)).await;

    match result {
        Ok(Ok(())) => debug!(%key, bytes, "Persisted event state"),
        Ok(Err(e)) => warn!(%key, error = %e, "Failed to persist event state"),
        Err(e) => warn!(%key, error = %e, "Event state write task failed"),
    }
}
