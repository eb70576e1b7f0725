use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use petcal_core::EventStateStore;

use crate::render::render_event;

pub fn run(store: &EventStateStore, event_id: &str, force: bool) -> Result<()> {
    let state = store.snapshot();

    if !state.event_ids().iter().any(|id| id == event_id) {
        println!("{}", format!("Nothing recorded for {event_id}").dimmed());
        return Ok(());
    }

    // Confirm unless --force
    if !force {
        for line in render_event(&state, event_id) {
            println!("{line}");
        }
        println!();

        let confirmed = Confirm::new()
            .with_prompt(format!("Forget local state for {event_id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    store.forget_event(event_id);
    println!("{} Forgot {}", "✓".green(), event_id.bold());

    Ok(())
}
