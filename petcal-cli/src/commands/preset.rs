use anyhow::Result;
use owo_colors::OwoColorize;
use petcal_core::{EventStateStore, ReminderPreset};

use crate::render::Render;

pub fn set(store: &EventStateStore, event_id: &str, preset: ReminderPreset) -> Result<()> {
    println!("{} {} {}", "✓".green(), event_id.bold(), preset.render());
    store.set_preset_selection(event_id, preset);

    Ok(())
}

pub fn clear(store: &EventStateStore, event_id: &str) -> Result<()> {
    store.clear_preset_selection(event_id);
    println!("{} Cleared preset for {}", "✓".green(), event_id.bold());

    Ok(())
}

pub fn list() {
    for preset in ReminderPreset::ALL {
        println!("  {}", preset.render());
    }
}
