//! The `ft stats` command: procrastination analyzer summary.

use std::fmt::Write;

use anyhow::{Context, Result};
use ft_core::bucket::{self, DAY_MS};
use ft_core::kind::TaskStatus;
use ft_core::summary::{self, StatsSummary};
use ft_core::trend::TrendDirection;
use ft_db::Database;

use super::util;

/// Runs the stats command over the trailing 7 days.
pub fn run(db: &Database, user: &str, json: bool, now: i64) -> Result<()> {
    let events = db
        .events_in_range(user, now - 7 * DAY_MS, now)
        .context("failed to load events")?;
    let tasks = db
        .tasks_with_status(user, TaskStatus::Active)
        .context("failed to load tasks")?;

    let stats = summary::stats_summary(&events, &tasks, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render(&stats, now));
    }
    Ok(())
}

fn trend_arrow(trend: TrendDirection) -> &'static str {
    match trend {
        TrendDirection::Up => "↑",
        TrendDirection::Down => "↓",
        TrendDirection::Flat => "→",
    }
}

fn render(stats: &StatsSummary, now: i64) -> String {
    let mut output = String::new();

    writeln!(output, "FOCUS STATS (last 7 days)").unwrap();
    writeln!(output, "─────────────────────────").unwrap();
    writeln!(
        output,
        "Focus score:     {:>3}  [{}]",
        stats.focus_score,
        stats.system_status.as_str()
    )
    .unwrap();
    writeln!(
        output,
        "Focus time:      {} across {} sessions (avg {}m)",
        util::format_minutes(stats.counts.focus_minutes),
        stats.completed_sessions,
        stats.avg_session_minutes
    )
    .unwrap();
    writeln!(
        output,
        "Distractions:    {} costing {}",
        stats.distractions,
        util::format_minutes(stats.counts.distraction_minutes)
    )
    .unwrap();
    writeln!(output, "Streak:          {}", stats.streak_impact.as_str()).unwrap();
    writeln!(output, "Analyzing:       {}", stats.analyzing_label).unwrap();

    if !stats.top_distractions.is_empty() {
        writeln!(output).unwrap();
        writeln!(
            output,
            "TOP DISTRACTIONS {}",
            trend_arrow(stats.top_distraction_trend)
        )
        .unwrap();
        for entry in &stats.top_distractions {
            writeln!(
                output,
                "  {:<24} {:>7}",
                entry.label,
                util::format_minutes(entry.minutes)
            )
            .unwrap();
        }
    }

    if !stats.peak_hours.is_empty() {
        let hours: Vec<_> = stats
            .peak_hours
            .iter()
            .map(|&hour| bucket::hour_label(hour))
            .collect();
        writeln!(output).unwrap();
        writeln!(
            output,
            "Peak hours {}:   {}",
            trend_arrow(stats.peak_hours_trend),
            hours.join(", ")
        )
        .unwrap();
    }

    if !stats.delay_patterns.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "DELAY PATTERNS").unwrap();
        for pattern in &stats.delay_patterns {
            writeln!(
                output,
                "  {:<24} avg {}d late",
                pattern.category, pattern.avg_delay_days
            )
            .unwrap();
        }
    }

    if !stats.active_tasks.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "ACTIVE TASKS").unwrap();
        for task in &stats.active_tasks {
            writeln!(
                output,
                "  {:<24} [{}] {}",
                task.title,
                task.category,
                util::describe_due(task.due_date, now)
            )
            .unwrap();
        }
    }

    output
}
