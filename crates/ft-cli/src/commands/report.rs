//! The `ft report` command: exportable N-day report.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::Local;
use ft_core::bucket::{self, DAY_MS};
use ft_core::summary::{self, WeeklyReport};
use ft_db::Database;
use serde::Serialize;

use super::util;

/// JSON export envelope around the report itself.
#[derive(Debug, Serialize)]
struct ReportExport<'a> {
    generated_at: String,
    timezone: String,
    #[serde(flatten)]
    report: &'a WeeklyReport,
}

/// Runs the report command over the last `days` calendar days.
pub fn run(db: &Database, user: &str, days: u32, json: bool, now: i64) -> Result<()> {
    let today_start = bucket::day_start(now, &Local);
    let days = days.clamp(1, 30);
    let start_date = today_start - i64::from(days - 1) * DAY_MS;
    let events = db
        .events_in_range(user, start_date, now)
        .context("failed to load events")?;

    let report = summary::weekly_report(&events, today_start, days);

    if json {
        let export = ReportExport {
            generated_at: chrono::DateTime::from_timestamp_millis(now)
                .map_or_else(String::new, |t| t.to_rfc3339()),
            timezone: iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}

fn render(report: &WeeklyReport) -> String {
    let mut output = String::new();
    let summary = &report.summary;

    writeln!(
        output,
        "REPORT {} .. {} ({} days)",
        util::format_date(summary.start_date, &Local),
        util::format_date(summary.end_date, &Local),
        summary.days
    )
    .unwrap();
    writeln!(output, "──────────────────────────────────").unwrap();
    writeln!(
        output,
        "Focus {}  Distraction {}  Total {}  Score {}",
        util::format_minutes(summary.focus_minutes),
        util::format_minutes(summary.distraction_minutes),
        util::format_minutes(summary.total_minutes),
        summary.focus_score
    )
    .unwrap();
    writeln!(output).unwrap();

    writeln!(output, "date,focus_minutes,distraction_minutes").unwrap();
    for row in &report.csv_rows {
        writeln!(
            output,
            "{},{},{}",
            util::format_date(row.date, &Local),
            row.focus_minutes,
            row.distraction_minutes
        )
        .unwrap();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::kind::EventKind;
    use ft_core::types::ActivityEvent;

    #[test]
    fn render_emits_one_csv_row_per_day() {
        let today_start = 100 * DAY_MS;
        let events = vec![ActivityEvent {
            id: "e1".to_string(),
            kind: EventKind::Focus,
            label: "Deep work".to_string(),
            minutes: 60,
            created_at: today_start + 1000,
            hour_bucket: Some(0),
        }];
        let report = summary::weekly_report(&events, today_start, 7);
        let output = render(&report);

        assert!(output.contains("(7 days)"));
        assert!(output.contains("date,focus_minutes,distraction_minutes"));
        let csv_rows = output
            .lines()
            .skip_while(|l| !l.starts_with("date,"))
            .skip(1)
            .count();
        assert_eq!(csv_rows, 7);
        assert!(output.contains(",60,0"));
    }

    #[test]
    fn report_export_flattens_summary() {
        let report = summary::weekly_report(&[], 100 * DAY_MS, 7);
        let export = ReportExport {
            generated_at: "2025-01-15T00:00:00+00:00".to_string(),
            timezone: "UTC".to_string(),
            report: &report,
        };
        let json = serde_json::to_value(&export).expect("serialize");

        assert_eq!(json["timezone"], "UTC");
        assert_eq!(json["summary"]["days"], 7);
        assert_eq!(json["csv_rows"].as_array().map(Vec::len), Some(7));
    }
}
