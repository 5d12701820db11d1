//! Event logging and listing commands.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::Local;
use ft_core::kind::EventKind;
use ft_core::types::ActivityEvent;
use ft_db::Database;

use super::util;

/// Logs a new event and prints its id.
pub fn log(db: &Database, user: &str, kind: EventKind, label: &str, minutes: u32, now: i64) -> Result<()> {
    let event = db
        .log_event(user, kind, label, minutes, now)
        .context("failed to log event")?;
    println!(
        "Logged {} \"{}\" ({}) as {}",
        event.kind,
        event.label,
        util::format_minutes(u64::from(event.minutes)),
        event.id
    );
    Ok(())
}

/// Edits an event's label and minutes.
pub fn edit(db: &Database, user: &str, id: &str, label: &str, minutes: u32, now: i64) -> Result<()> {
    db.update_event(user, id, label, minutes, now)
        .context("failed to update event")?;
    println!("Updated {id}");
    Ok(())
}

/// Deletes an event.
pub fn delete(db: &Database, user: &str, id: &str) -> Result<()> {
    db.delete_event(user, id).context("failed to delete event")?;
    println!("Deleted {id}");
    Ok(())
}

/// Lists recent events, newest first.
pub fn list(db: &Database, user: &str, limit: usize) -> Result<()> {
    let events = db.list_events(user, limit).context("failed to list events")?;
    print!("{}", render_list(&events));
    Ok(())
}

fn render_list(events: &[ActivityEvent]) -> String {
    let mut output = String::new();
    if events.is_empty() {
        writeln!(output, "No events logged yet.").unwrap();
        writeln!(output, "Hint: Run 'ft log focus \"Deep work\" 25' to start.").unwrap();
        return output;
    }
    for event in events {
        writeln!(
            output,
            "{}  {:<11}  {:>7}  {}  ({})",
            util::format_date(event.created_at, &Local),
            event.kind.as_str(),
            util::format_minutes(u64::from(event.minutes)),
            event.label,
            event.id
        )
        .unwrap();
    }
    output
}
