//! The `ft cost` command: what distraction time costs in money.

use std::fmt::Write;

use anyhow::{Context, Result};
use ft_core::bucket::DAY_MS;
use ft_core::summary::{self, DistractionCost};
use ft_db::Database;

use super::util;

/// Runs the cost command over the trailing 7 days.
pub fn run(db: &Database, user: &str, rate: Option<f64>, json: bool, now: i64) -> Result<()> {
    let events = db
        .events_in_range(user, now - 7 * DAY_MS, now)
        .context("failed to load events")?;

    let cost = summary::distraction_cost(&events, rate, 7);

    if json {
        println!("{}", serde_json::to_string_pretty(&cost)?);
    } else {
        print!("{}", render(&cost));
    }
    Ok(())
}

fn render(cost: &DistractionCost) -> String {
    let mut output = String::new();
    writeln!(output, "DISTRACTION COST (last 7 days)").unwrap();
    writeln!(output, "──────────────────────────────").unwrap();
    writeln!(
        output,
        "Distraction time:  {} across {} context switches",
        util::format_minutes(cost.total_distraction_minutes),
        cost.context_switches
    )
    .unwrap();
    writeln!(output, "Hourly rate:       ${:.2}", cost.hourly_rate).unwrap();
    writeln!(output, "Daily cost:        ${:.2}", cost.daily_cost).unwrap();
    writeln!(output, "Annual projection: ${:.2}", cost.annual_projection).unwrap();
    output
}
