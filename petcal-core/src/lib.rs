//! Core types for petcal.
//!
//! petcal keeps a small per-device overlay on top of the events owned by the
//! main pet-care data source:
//! - `event_status` for the local "did it happen" status of an event
//! - `preset` for the reminder lead time the owner picked
//! - `quiet_hours` for the do-not-notify window
//! - `store` for the in-memory store that writes all of it through to a
//!   key-value `storage` adapter

pub mod error;
pub mod event_status;
pub mod local_state;
pub mod petcal_config;
pub mod preset;
pub mod quiet_hours;
pub mod storage;
pub mod store;

pub use error::{PetcalError, PetcalResult};
pub use event_status::{EventStatus, StatusEntry};
pub use local_state::EventLocalState;
pub use petcal_config::PetcalConfig;
pub use preset::ReminderPreset;
pub use quiet_hours::QuietHours;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::EventStateStore;
