//! The `ft dashboard` command: headline scalars with 7-day sparklines.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::Local;
use ft_core::bucket::{self, DAY_MS};
use ft_core::kind::TaskStatus;
use ft_core::summary::{self, DashboardStats};
use ft_db::Database;

use super::util;

/// Runs the dashboard command over the 7 calendar days ending today.
pub fn run(db: &Database, user: &str, json: bool, now: i64) -> Result<()> {
    let window_start = bucket::day_start(now, &Local) - 6 * DAY_MS;
    let events = db
        .events_in_range(user, window_start, now)
        .context("failed to load events")?;
    let done_tasks = db
        .tasks_with_status(user, TaskStatus::Done)
        .context("failed to load tasks")?;

    let stats = summary::dashboard_stats(&events, &done_tasks, window_start);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render(&stats));
    }
    Ok(())
}

fn render(stats: &DashboardStats) -> String {
    let productivity: Vec<u64> = stats
        .productivity_score_sparkline
        .iter()
        .map(|&score| u64::from(score))
        .collect();

    let mut output = String::new();
    writeln!(output, "DASHBOARD (last 7 days)").unwrap();
    writeln!(output, "───────────────────────").unwrap();
    writeln!(
        output,
        "Focus time      {:>8}  {}",
        util::format_minutes(stats.focus_minutes),
        util::sparkline(&stats.focus_minutes_sparkline)
    )
    .unwrap();
    writeln!(
        output,
        "Distractions    {:>8}  {}",
        stats.distraction_count,
        util::sparkline(&stats.distraction_count_sparkline)
    )
    .unwrap();
    writeln!(
        output,
        "Tasks done      {:>8}  {}",
        stats.tasks_completed,
        util::sparkline(&stats.tasks_completed_sparkline)
    )
    .unwrap();
    writeln!(
        output,
        "Productivity    {:>8}  {}",
        stats.productivity_score,
        util::sparkline(&productivity)
    )
    .unwrap();
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::kind::EventKind;
    use ft_core::types::ActivityEvent;

    fn event(kind: EventKind, minutes: u32, created_at: i64) -> ActivityEvent {
        ActivityEvent {
            id: format!("evt-{created_at}"),
            kind,
            label: "x".to_string(),
            minutes,
            created_at,
            hour_bucket: Some(0),
        }
    }

    #[test]
    fn render_shows_four_rows_of_seven_bars() {
        let window_start = 100 * DAY_MS;
        let events = vec![
            event(EventKind::Focus, 120, window_start + DAY_MS),
            event(EventKind::Distraction, 30, window_start + 2 * DAY_MS),
        ];
        let stats = summary::dashboard_stats(&events, &[], window_start);
        let output = render(&stats);

        assert_eq!(output.lines().count(), 6);
        assert!(output.contains("2h 0m"));
        for line in output.lines().skip(2) {
            let bars = line.chars().filter(|c| "░▁▂▃▄▅▆▇█".contains(*c)).count();
            assert_eq!(bars, 7, "row should have one bar per day: {line}");
        }
    }
}
