//! Shared formatting utilities for CLI commands.

use ft_core::bucket::DAY_MS;

const BAR_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Formats minutes as a duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
#[must_use]
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours >= 1 {
        format!("{hours}h {rest}m")
    } else {
        format!("{rest}m")
    }
}

/// Renders one bar character per value, scaled to the series maximum.
///
/// Zero values render as `░` so empty days stay visible in the row.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn sparkline(values: &[u64]) -> String {
    let max = values.iter().copied().max().unwrap_or(0);
    values
        .iter()
        .map(|&value| {
            if value == 0 || max == 0 {
                return '░';
            }
            let ratio = value as f64 / max as f64;
            let level = (ratio * 8.0).round().clamp(1.0, 8.0) as usize;
            BAR_LEVELS[level - 1]
        })
        .collect()
}

/// Formats an epoch-ms timestamp as a local calendar date.
pub fn format_date<Tz: chrono::TimeZone>(ts_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    chrono::DateTime::from_timestamp_millis(ts_ms).map_or_else(
        || "-".to_string(),
        |utc| utc.with_timezone(tz).format("%Y-%m-%d").to_string(),
    )
}

/// Describes how far a due date is from `now`, in whole days.
#[must_use]
pub fn describe_due(due_date: i64, now: i64) -> String {
    let delta_days = (due_date - now).div_euclid(DAY_MS);
    if due_date < now {
        let overdue = (now - due_date).div_euclid(DAY_MS).max(1);
        format!("overdue by {overdue}d")
    } else if delta_days == 0 {
        "due today".to_string()
    } else {
        format!("due in {delta_days}d")
    }
}
