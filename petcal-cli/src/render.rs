//! TUI rendering traits for petcal-core types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to petcal-core types using owo_colors.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;
use petcal_core::{EventLocalState, EventStatus, QuietHours, ReminderPreset};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventStatus {
    fn render(&self) -> String {
        match self {
            EventStatus::Pending => self.as_str().dimmed().to_string(),
            EventStatus::Completed => self.as_str().green().to_string(),
            EventStatus::Cancelled => self.as_str().yellow().to_string(),
            EventStatus::Missed => self.as_str().red().to_string(),
        }
    }
}

impl Render for ReminderPreset {
    fn render(&self) -> String {
        format!("{} {}", self.key().cyan(), lead_time_label(self).dimmed())
    }
}

impl Render for QuietHours {
    fn render(&self) -> String {
        if self.is_empty() {
            return "off".dimmed().to_string();
        }

        let now = Local::now().time();
        let label = hours_label(self);

        if self.contains(now) {
            format!("{} {}", label, "(quiet now)".yellow())
        } else {
            label
        }
    }
}

/// "15m before", "1day before", "at start time"
pub fn lead_time_label(preset: &ReminderPreset) -> String {
    match preset.minutes() {
        None => "unknown lead time".to_string(),
        Some(0) => "at start time".to_string(),
        Some(minutes) => {
            let duration = Duration::from_secs(minutes.unsigned_abs() * 60);
            format!("{} before", humantime::format_duration(duration))
        }
    }
}

/// "22:00-08:00"
pub fn hours_label(quiet: &QuietHours) -> String {
    format!("{:02}:00-{:02}:00", quiet.start_hour(), quiet.end_hour())
}

fn updated_label(updated_at: &DateTime<Utc>) -> String {
    updated_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Lines describing a single event's overlay.
pub fn render_event(state: &EventLocalState, event_id: &str) -> Vec<String> {
    let mut lines = vec![format!("🐾 {}", event_id.bold())];

    match state.statuses.get(event_id) {
        Some(entry) => lines.push(format!(
            "   status:    {} {}",
            entry.status.render(),
            updated_label(&entry.updated_at).dimmed()
        )),
        None => lines.push(format!("   status:    {}", EventStatus::Pending.render())),
    }

    match state.preset_selections.get(event_id) {
        Some(preset) => lines.push(format!("   preset:    {}", preset.render())),
        None => lines.push(format!("   preset:    {}", "none".dimmed())),
    }

    match state.reminder_ids.get(event_id) {
        Some(ids) if ids.is_empty() => {
            lines.push(format!("   reminders: {}", "none scheduled".dimmed()))
        }
        Some(ids) => lines.push(format!("   reminders: {}", ids.join(", "))),
        None => lines.push(format!("   reminders: {}", "-".dimmed())),
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_time_label() {
        assert_eq!(lead_time_label(&ReminderPreset::AtTime), "at start time");
        assert_eq!(lead_time_label(&ReminderPreset::FifteenMinutes), "15m before");
        assert_eq!(lead_time_label(&ReminderPreset::TwoHours), "2h before");
        assert_eq!(lead_time_label(&ReminderPreset::OneDay), "1day before");
        assert_eq!(
            lead_time_label(&ReminderPreset::Other("10min".into())),
            "unknown lead time"
        );
    }

    #[test]
    fn test_hours_label() {
        assert_eq!(hours_label(&QuietHours::default()), "22:00-08:00");
        assert_eq!(hours_label(&QuietHours::new(6, 9).unwrap()), "06:00-09:00");
    }

    #[test]
    fn test_render_event_distinguishes_empty_from_absent() {
        let mut state = EventLocalState::default();
        state.set_reminder_ids("walk", vec![]);

        let walk = render_event(&state, "walk").join("\n");
        let feed = render_event(&state, "feed").join("\n");

        assert!(walk.contains("none scheduled"));
        assert!(!feed.contains("none scheduled"));
    }
}
