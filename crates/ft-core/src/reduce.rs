//! Event reducer: single-pass folds over window-bounded event lists.
//!
//! The reducer assumes well-formed, non-negative minutes and never fails;
//! validation is the writer's responsibility. Events are expected to be
//! pre-filtered to one user and one time window by the storage layer.

use crate::bucket;
use crate::types::ActivityEvent;

/// Per-category counts and minute totals for one window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StatCounts {
    pub focus_count: u32,
    pub distraction_count: u32,
    pub focus_minutes: u64,
    pub distraction_minutes: u64,
    pub total_minutes: u64,
}

/// Per-label count and minute totals.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LabelTotal {
    pub label: String,
    pub count: u32,
    pub minutes: u64,
}

/// Accumulated totals keyed by label, preserving first-seen order.
///
/// Insertion order matters: ranking selectors use a stable sort, so ties
/// resolve to whichever label was seen first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelTotals {
    entries: Vec<LabelTotal>,
}

impl LabelTotals {
    pub fn add(&mut self, label: &str, minutes: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.label == label) {
            entry.count += 1;
            entry.minutes += minutes;
        } else {
            self.entries.push(LabelTotal {
                label: label.to_string(),
                count: 1,
                minutes,
            });
        }
    }

    /// Minutes accumulated for `label`, `0` if unseen.
    #[must_use]
    pub fn minutes_for(&self, label: &str) -> u64 {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map_or(0, |e| e.minutes)
    }

    /// Sum of minutes across all labels.
    #[must_use]
    pub fn total_minutes(&self) -> u64 {
        self.entries.iter().map(|e| e.minutes).sum()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[LabelTotal] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Occurrence counts per hour-of-day bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HourCounts([u32; 24]);

impl HourCounts {
    pub fn add(&mut self, hour: u8) {
        if let Some(slot) = self.0.get_mut(hour as usize) {
            *slot += 1;
        }
    }

    #[must_use]
    pub fn get(&self, hour: u8) -> u32 {
        self.0.get(hour as usize).copied().unwrap_or(0)
    }

    /// The busiest single hour's count, `0` when nothing was recorded.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// `(hour, count)` pairs in hour order, 0 through 23.
    #[must_use]
    pub fn entries(&self) -> [(u8, u32); 24] {
        let mut out = [(0_u8, 0_u32); 24];
        for (hour, slot) in out.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            {
                *slot = (hour as u8, self.0[hour]);
            }
        }
        out
    }
}

/// Minute totals per hour-of-day bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HourMinutes([u64; 24]);

impl HourMinutes {
    pub fn add(&mut self, hour: u8, minutes: u64) {
        if let Some(slot) = self.0.get_mut(hour as usize) {
            *slot += minutes;
        }
    }

    #[must_use]
    pub fn get(&self, hour: u8) -> u64 {
        self.0.get(hour as usize).copied().unwrap_or(0)
    }

    /// `(hour, minutes)` pairs in hour order, 0 through 23.
    #[must_use]
    pub fn entries(&self) -> [(u8, u64); 24] {
        let mut out = [(0_u8, 0_u64); 24];
        for (hour, slot) in out.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            {
                *slot = (hour as u8, self.0[hour]);
            }
        }
        out
    }
}

/// Result of the main single-pass fold over a window of events.
#[derive(Debug, Default, Clone)]
pub struct EventFold {
    pub counts: StatCounts,
    /// Per-label totals for distraction events only.
    pub distraction_labels: LabelTotals,
    /// Occurrence counts per hour bucket, all event kinds.
    pub hour_counts: HourCounts,
    /// Focus minutes per hour bucket.
    pub focus_minutes_by_hour: HourMinutes,
    /// Focus minutes inside the trailing recent window.
    pub recent_focus_minutes: u64,
    /// Distraction minutes inside the trailing recent window.
    pub recent_distraction_minutes: u64,
}

/// Folds a window of events in a single pass.
///
/// `recent_start` bounds the trailing sub-window used for streak
/// classification (normally the last 24 hours); pass `now` to disable it.
pub fn fold_events(events: &[ActivityEvent], recent_start: i64) -> EventFold {
    let mut fold = EventFold::default();

    for event in events {
        let minutes = u64::from(event.minutes);
        fold.counts.total_minutes += minutes;

        if event.is_focus() {
            fold.counts.focus_count += 1;
            fold.counts.focus_minutes += minutes;
            fold.focus_minutes_by_hour.add(event.hour(), minutes);
        } else {
            fold.counts.distraction_count += 1;
            fold.counts.distraction_minutes += minutes;
            fold.distraction_labels.add(&event.label, minutes);
        }

        if event.created_at >= recent_start {
            if event.is_focus() {
                fold.recent_focus_minutes += minutes;
            } else {
                fold.recent_distraction_minutes += minutes;
            }
        }

        fold.hour_counts.add(event.hour());
    }

    fold
}

/// Current-vs-previous period accumulators for trend comparisons.
#[derive(Debug, Default, Clone)]
pub struct PeriodSplit {
    pub current_distraction_minutes: LabelTotals,
    pub previous_distraction_minutes: LabelTotals,
    pub current_hour_counts: HourCounts,
    pub previous_hour_counts: HourCounts,
}

/// Splits events into current and previous periods for trend comparison.
///
/// Only events with `created_at` in `[last_period_start, now)` count;
/// `recent_start` is the partition point between the two periods.
pub fn split_periods(
    events: &[ActivityEvent],
    last_period_start: i64,
    recent_start: i64,
    now: i64,
) -> PeriodSplit {
    let mut split = PeriodSplit::default();

    for event in events {
        if event.created_at < last_period_start || event.created_at >= now {
            continue;
        }
        let is_previous = event.created_at < recent_start;

        if event.is_distraction() {
            let minutes = u64::from(event.minutes);
            if is_previous {
                split.previous_distraction_minutes.add(&event.label, minutes);
            } else {
                split.current_distraction_minutes.add(&event.label, minutes);
            }
        }

        if is_previous {
            split.previous_hour_counts.add(event.hour());
        } else {
            split.current_hour_counts.add(event.hour());
        }
    }

    split
}

/// Generic day-bucketed fold: sums `value` per day index relative to
/// `window_start`.
///
/// Records whose day index falls outside `[0, days)` contribute nothing;
/// the bound check is defensive, not an error path.
pub fn bucket_by_day<T>(
    records: &[T],
    window_start: i64,
    days: usize,
    timestamp: impl Fn(&T) -> i64,
    value: impl Fn(&T) -> u64,
) -> Vec<u64> {
    let mut buckets = vec![0_u64; days];
    for record in records {
        let index = bucket::day_index(timestamp(record), window_start);
        let Ok(index) = usize::try_from(index) else {
            continue;
        };
        if let Some(slot) = buckets.get_mut(index) {
            *slot += value(record);
        }
    }
    buckets
}
