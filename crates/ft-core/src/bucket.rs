//! Time bucketing utilities.
//!
//! All aggregation windows are anchored on local midnight, so the timezone
//! is always supplied by the caller; the functions themselves never consult
//! a clock or the system timezone. Timestamps are epoch milliseconds.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Milliseconds in one hour.
pub const HOUR_MS: i64 = 60 * 60 * 1000;

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Truncates a timestamp to midnight of its calendar day in `tz`.
///
/// This is the anchor for every day-indexed window. Out-of-range
/// timestamps are returned unchanged.
pub fn day_start<Tz: TimeZone>(ts_ms: i64, tz: &Tz) -> i64 {
    let Some(utc) = DateTime::from_timestamp_millis(ts_ms) else {
        return ts_ms;
    };
    let date = utc.with_timezone(tz).date_naive();
    midnight_ms(date, tz).unwrap_or(ts_ms)
}

/// Converts a calendar date to its first instant in `tz`, as epoch ms.
///
/// DST ambiguity (fall-back) picks the earlier time; a spring-forward gap
/// at midnight falls through to 1am, which always exists.
fn midnight_ms<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<i64> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.timestamp_millis()),
        LocalResult::None => {
            let one_am = date.and_time(NaiveTime::from_hms_opt(1, 0, 0)?);
            tz.from_local_datetime(&one_am)
                .earliest()
                .map(|dt| dt.timestamp_millis())
        }
    }
}

/// Index of the day containing `ts_ms`, counted from `window_start_ms`.
///
/// Callers must discard indices outside `[0, days)`; out-of-range events
/// are ignored, not an error.
#[must_use]
pub const fn day_index(ts_ms: i64, window_start_ms: i64) -> i64 {
    (ts_ms - window_start_ms).div_euclid(DAY_MS)
}

/// Hour-of-day bucket: `floor(ts / 3_600_000) mod 24`.
///
/// Matches the value precomputed at the write path bit-for-bit. Prefer a
/// stored bucket when a record carries one; recompute with this otherwise.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn hour_bucket(ts_ms: i64) -> u8 {
    ts_ms.div_euclid(HOUR_MS).rem_euclid(24) as u8
}

/// Three-letter weekday name for the calendar day of `ts_ms` in `tz`.
pub fn day_label<Tz: TimeZone>(ts_ms: i64, tz: &Tz) -> &'static str {
    let Some(utc) = DateTime::from_timestamp_millis(ts_ms) else {
        return DAY_LABELS[0];
    };
    let weekday = utc.with_timezone(tz).date_naive().weekday();
    DAY_LABELS[weekday.num_days_from_sunday() as usize]
}

/// 12-hour clock label with a lowercase `am`/`pm` suffix.
///
/// Hours 0 and 12 map to `12am` and `12pm`.
#[must_use]
pub fn hour_label(hour: u8) -> String {
    let period = if hour >= 12 { "pm" } else { "am" };
    let normalized = if hour % 12 == 0 { 12 } else { hour % 12 };
    format!("{normalized}{period}")
}

/// Rounds to a fixed number of decimal places, half away from zero.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
