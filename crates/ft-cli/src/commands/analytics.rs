//! The `ft analytics` command: weekly trend, sources, and insights.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::Local;
use ft_core::bucket::{self, DAY_MS};
use ft_core::summary::{self, AnalyticsSummary};
use ft_db::Database;

use super::util;

/// Runs the analytics command over the 7 calendar days ending today.
pub fn run(db: &Database, user: &str, json: bool, now: i64) -> Result<()> {
    let window_start = bucket::day_start(now, &Local) - 6 * DAY_MS;
    let events = db
        .events_in_range(user, window_start, now)
        .context("failed to load events")?;

    let analytics = summary::analytics_summary(&events, window_start, &Local);

    if json {
        println!("{}", serde_json::to_string_pretty(&analytics)?);
    } else {
        print!("{}", render(&analytics));
    }
    Ok(())
}

fn render(analytics: &AnalyticsSummary) -> String {
    let mut output = String::new();

    writeln!(output, "WEEKLY FOCUS TREND").unwrap();
    writeln!(output, "──────────────────").unwrap();
    for day in &analytics.weekly_focus_trend {
        writeln!(
            output,
            "{}  {:>5}h  score {:>3}",
            day.day, day.focus_hours, day.focus_score
        )
        .unwrap();
    }

    if !analytics.distraction_sources.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "DISTRACTION SOURCES").unwrap();
        for source in &analytics.distraction_sources {
            writeln!(
                output,
                "  {:<24} {:>7}  {:>5}%",
                source.label,
                util::format_minutes(source.minutes),
                source.percentage
            )
            .unwrap();
        }
    }

    if !analytics.peak_performance_hours.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "PEAK PERFORMANCE HOURS").unwrap();
        for hour in &analytics.peak_performance_hours {
            writeln!(
                output,
                "  {:<6} {:>7}",
                hour.label,
                util::format_minutes(hour.focus_minutes)
            )
            .unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "INSIGHTS").unwrap();
    for insight in &analytics.ai_insights {
        writeln!(output, "  {}: {}", insight.title, insight.text).unwrap();
    }

    output
}
