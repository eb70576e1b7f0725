pub mod config;
pub mod forget;
pub mod preset;
pub mod quiet_hours;
pub mod reminders;
pub mod show;
