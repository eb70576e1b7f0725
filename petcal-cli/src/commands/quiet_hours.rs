use anyhow::Result;
use owo_colors::OwoColorize;
use petcal_core::{EventStateStore, QuietHours};

use crate::render::Render;

pub fn run(store: &EventStateStore, start: Option<u8>, end: Option<u8>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        let quiet_hours = QuietHours::new(start, end)?;
        store.set_quiet_hours(quiet_hours);
    }

    println!("{} {}", "Quiet hours:".bold(), store.quiet_hours().render());

    Ok(())
}
