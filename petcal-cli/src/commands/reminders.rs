use anyhow::Result;
use owo_colors::OwoColorize;
use petcal_core::EventStateStore;

pub fn set(store: &EventStateStore, event_id: &str, handles: Vec<String>) -> Result<()> {
    let count = handles.len();
    store.set_reminder_ids(event_id, handles);

    println!(
        "{} {} {} for {}",
        "✓".green(),
        count,
        if count == 1 { "reminder" } else { "reminders" },
        event_id.bold()
    );

    Ok(())
}

pub fn clear(store: &EventStateStore, event_id: &str) -> Result<()> {
    if store.reminder_ids(event_id).is_none() {
        println!("{}", format!("No reminders recorded for {event_id}").dimmed());
        return Ok(());
    }

    store.clear_reminder_ids(event_id);
    println!("{} Cleared reminders for {}", "✓".green(), event_id.bold());

    Ok(())
}
