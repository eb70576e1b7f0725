//! Local status overlay for events.
//!
//! The primary event source doesn't track whether the owner actually did the
//! thing (fed the cat, went to the vet). That "last known" status lives here.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Local status of an event.
///
/// Events without a recorded entry are implicitly `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
    Missed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Missed => "missed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded status together with the time it was last changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub status: EventStatus,
    pub updated_at: DateTime<Utc>,
}

impl StatusEntry {
    /// Stamp `status` at `now`, never earlier than the previous entry.
    ///
    /// Wall clocks can step backwards; `updated_at` must not.
    pub fn stamp(status: EventStatus, now: DateTime<Utc>, previous: Option<&StatusEntry>) -> Self {
        let updated_at = match previous {
            Some(prev) if prev.updated_at > now => prev.updated_at,
            _ => now,
        };

        StatusEntry { status, updated_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&EventStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");

        let parsed: EventStatus = serde_json::from_str("\"missed\"").unwrap();
        assert_eq!(parsed, EventStatus::Missed);
    }

    #[test]
    fn test_entry_uses_camel_case_fields() {
        let entry = StatusEntry {
            status: EventStatus::Completed,
            updated_at: Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["updatedAt"], "2025-03-20T15:00:00Z");
    }

    #[test]
    fn test_stamp_never_goes_backwards() {
        let later = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2025, 3, 20, 14, 0, 0).unwrap();

        let first = StatusEntry::stamp(EventStatus::Completed, later, None);
        let second = StatusEntry::stamp(EventStatus::Missed, earlier, Some(&first));

        assert_eq!(second.status, EventStatus::Missed);
        assert_eq!(second.updated_at, later);
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(EventStatus::default(), EventStatus::Pending);
    }
}
