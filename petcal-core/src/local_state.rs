//! The persisted overlay document.
//!
//! One JSON value holds every event's local status, reminder handles and
//! preset choice, plus the quiet-hours window:
//!
//! ```text
//! {
//!   "reminderIds":      { "<eventId>": ["<handle>", ...] },
//!   "statuses":         { "<eventId>": { "status": "missed", "updatedAt": "<rfc3339>" } },
//!   "presetSelections": { "<eventId>": "15min" },
//!   "quietHours":       { "startHour": 22, "endHour": 8 }
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::PetcalResult;
use crate::event_status::{EventStatus, StatusEntry};
use crate::preset::ReminderPreset;
use crate::quiet_hours::QuietHours;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventLocalState {
    pub reminder_ids: BTreeMap<String, Vec<String>>,
    pub statuses: BTreeMap<String, StatusEntry>,
    pub preset_selections: BTreeMap<String, ReminderPreset>,
    #[serde(deserialize_with = "quiet_hours_or_default")]
    pub quiet_hours: QuietHours,
}

// A bad quiet-hours record shouldn't cost every event's reminder handles.
fn quiet_hours_or_default<'de, D>(deserializer: D) -> Result<QuietHours, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    match serde_json::from_value::<QuietHours>(value) {
        Ok(quiet_hours) => Ok(quiet_hours),
        Err(e) => {
            warn!(error = %e, "Stored quiet hours are invalid, using defaults");
            Ok(QuietHours::default())
        }
    }
}

impl EventLocalState {
    pub fn from_json(json: &str) -> PetcalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> PetcalResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Implicit `Pending` when nothing was recorded.
    pub fn status(&self, event_id: &str) -> EventStatus {
        self.statuses
            .get(event_id)
            .map(|entry| entry.status)
            .unwrap_or_default()
    }

    pub fn set_status(&mut self, event_id: &str, status: EventStatus, now: DateTime<Utc>) {
        let entry = StatusEntry::stamp(status, now, self.statuses.get(event_id));
        self.statuses.insert(event_id.to_string(), entry);
    }

    pub fn reset_status(&mut self, event_id: &str) {
        self.statuses.remove(event_id);
    }

    pub fn set_reminder_ids(&mut self, event_id: &str, ids: Vec<String>) {
        self.reminder_ids.insert(event_id.to_string(), ids);
    }

    pub fn clear_reminder_ids(&mut self, event_id: &str) {
        self.reminder_ids.remove(event_id);
    }

    pub fn set_preset_selection(&mut self, event_id: &str, preset: ReminderPreset) {
        self.preset_selections.insert(event_id.to_string(), preset);
    }

    pub fn clear_preset_selection(&mut self, event_id: &str) {
        self.preset_selections.remove(event_id);
    }

    /// Drop everything recorded for an event.
    pub fn forget(&mut self, event_id: &str) {
        self.statuses.remove(event_id);
        self.reminder_ids.remove(event_id);
        self.preset_selections.remove(event_id);
    }

    /// Every event id that appears in at least one map, sorted.
    pub fn event_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .statuses
            .keys()
            .chain(self.reminder_ids.keys())
            .chain(self.preset_selections.keys())
            .cloned()
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Events with an explicit entry of `status`, sorted.
    pub fn event_ids_with_status(&self, status: EventStatus) -> Vec<String> {
        self.statuses
            .iter()
            .filter(|(_, entry)| entry.status == status)
            .map(|(id, _)| id.clone())
            .collect()
    }
}
