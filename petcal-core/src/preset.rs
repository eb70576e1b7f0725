//! Reminder presets (how long before an event to remind the owner).
//!
//! The preset list is owned by the app, so stored keys this build doesn't know
//! are kept as [`ReminderPreset::Other`] and written back unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::PetcalError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReminderPreset {
    AtTime,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    OneDay,
    OneWeek,
    /// A key from stored data that isn't one of the known presets.
    Other(String),
}

impl ReminderPreset {
    pub const ALL: [ReminderPreset; 8] = [
        ReminderPreset::AtTime,
        ReminderPreset::FiveMinutes,
        ReminderPreset::FifteenMinutes,
        ReminderPreset::ThirtyMinutes,
        ReminderPreset::OneHour,
        ReminderPreset::TwoHours,
        ReminderPreset::OneDay,
        ReminderPreset::OneWeek,
    ];

    /// The persisted key, e.g. `15min`.
    pub fn key(&self) -> &str {
        match self {
            ReminderPreset::AtTime => "atTime",
            ReminderPreset::FiveMinutes => "5min",
            ReminderPreset::FifteenMinutes => "15min",
            ReminderPreset::ThirtyMinutes => "30min",
            ReminderPreset::OneHour => "1hour",
            ReminderPreset::TwoHours => "2hours",
            ReminderPreset::OneDay => "1day",
            ReminderPreset::OneWeek => "1week",
            ReminderPreset::Other(key) => key,
        }
    }

    /// Known key or `Other`; never fails.
    pub fn from_key(key: &str) -> Self {
        ReminderPreset::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .unwrap_or_else(|| ReminderPreset::Other(key.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ReminderPreset::Other(_))
    }

    /// `None` for keys this build doesn't know.
    pub fn minutes(&self) -> Option<i64> {
        let minutes = match self {
            ReminderPreset::AtTime => 0,
            ReminderPreset::FiveMinutes => 5,
            ReminderPreset::FifteenMinutes => 15,
            ReminderPreset::ThirtyMinutes => 30,
            ReminderPreset::OneHour => 60,
            ReminderPreset::TwoHours => 120,
            ReminderPreset::OneDay => 60 * 24,
            ReminderPreset::OneWeek => 60 * 24 * 7,
            ReminderPreset::Other(_) => return None,
        };
        Some(minutes)
    }

    /// How long before the event start the reminder should fire.
    pub fn lead_time(&self) -> Option<Duration> {
        self.minutes().map(Duration::minutes)
    }
}

impl fmt::Display for ReminderPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Strict parse for user input: only known presets.
impl FromStr for ReminderPreset {
    type Err = PetcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ReminderPreset::from_key(s) {
            ReminderPreset::Other(key) => Err(PetcalError::UnknownPreset(key)),
            preset => Ok(preset),
        }
    }
}

impl From<String> for ReminderPreset {
    fn from(key: String) -> Self {
        ReminderPreset::from_key(&key)
    }
}

impl From<ReminderPreset> for String {
    fn from(preset: ReminderPreset) -> Self {
        match preset {
            ReminderPreset::Other(key) => key,
            known => known.key().to_string(),
        }
    }
}
