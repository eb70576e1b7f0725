use anyhow::Result;
use owo_colors::OwoColorize;
use petcal_core::EventStateStore;

use crate::render::{Render, render_event};

pub fn run(store: &EventStateStore, event_id: Option<&str>, json: bool) -> Result<()> {
    let state = store.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let event_ids = match event_id {
        Some(id) => vec![id.to_string()],
        None => state.event_ids(),
    };

    if event_ids.is_empty() {
        println!("{}", "No local event state yet".dimmed());
    }

    for (i, id) in event_ids.iter().enumerate() {
        for line in render_event(&state, id) {
            println!("{line}");
        }

        if i < event_ids.len() - 1 {
            println!();
        }
    }

    if event_id.is_none() {
        println!();
        println!("{} {}", "Quiet hours:".bold(), state.quiet_hours.render());
    }

    Ok(())
}
