//! The `ft stoppages` command: the freshest distractions, scored by drag.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::Local;
use ft_core::bucket::HOUR_MS;
use ft_core::summary::{self, LiveStoppages};
use ft_db::Database;

use super::util;

// Upstream fetch is wider than the display cap so focus events in
// between do not crowd out older distractions.
const FETCH_LIMIT: usize = 30;

/// Runs the stoppages command over the trailing 24 hours.
pub fn run(db: &Database, user: &str, json: bool, now: i64) -> Result<()> {
    let since = now - 24 * HOUR_MS;
    let events = db
        .recent_events_desc(user, since, FETCH_LIMIT)
        .context("failed to load events")?;

    let stoppages = summary::live_stoppages(&events, since);

    if json {
        println!("{}", serde_json::to_string_pretty(&stoppages)?);
    } else {
        print!("{}", render(&stoppages));
    }
    Ok(())
}

fn render(stoppages: &LiveStoppages) -> String {
    let mut output = String::new();
    writeln!(output, "LIVE STOPPAGES (last 24 hours)").unwrap();
    writeln!(output, "──────────────────────────────").unwrap();
    if stoppages.stoppages.is_empty() {
        writeln!(output, "No distractions logged in the last 24 hours.").unwrap();
        return output;
    }
    for stoppage in &stoppages.stoppages {
        writeln!(
            output,
            "{}  {:<24} {:>7}  impact {:>3}",
            util::format_date(stoppage.created_at, &Local),
            stoppage.label,
            util::format_minutes(u64::from(stoppage.minutes)),
            stoppage.impact_score
        )
        .unwrap();
    }
    output
}
