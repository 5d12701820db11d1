//! Ranking and top-N selectors over reduced totals.
//!
//! Two peak-hour selectors coexist on purpose: the metrics grid ranks by
//! event count and keeps three bare hour numbers, the performance panel
//! ranks by focus minutes and keeps five labeled entries. They can and do
//! disagree; do not unify them.

use serde::Serialize;

use crate::bucket;
use crate::reduce::{HourCounts, HourMinutes, LabelTotals};

/// One entry in the top-distraction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopDistraction {
    pub label: String,
    pub minutes: u64,
}

/// One distraction source with its share of total distraction minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistractionSource {
    pub label: String,
    pub minutes: u64,
    /// Share of all distraction minutes, rounded to 1 decimal. `0` when
    /// there are no distraction minutes at all.
    pub percentage: f64,
}

/// One labeled peak-performance hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeakHour {
    pub hour: u8,
    pub label: String,
    pub focus_minutes: u64,
}

/// Top `limit` distraction labels by minutes, descending.
///
/// The sort is stable, so labels tied on minutes keep first-seen order.
#[must_use]
pub fn top_distractions(labels: &LabelTotals, limit: usize) -> Vec<TopDistraction> {
    let mut ranked: Vec<_> = labels
        .as_slice()
        .iter()
        .map(|entry| TopDistraction {
            label: entry.label.clone(),
            minutes: entry.minutes,
        })
        .collect();
    ranked.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    ranked.truncate(limit);
    ranked
}

/// All distraction labels ranked by minutes descending, each with its
/// percentage share.
#[must_use]
pub fn distraction_sources(labels: &LabelTotals) -> Vec<DistractionSource> {
    let total = labels.total_minutes();
    let mut ranked: Vec<_> = labels
        .as_slice()
        .iter()
        .map(|entry| DistractionSource {
            label: entry.label.clone(),
            minutes: entry.minutes,
            percentage: share_percentage(entry.minutes, total),
        })
        .collect();
    ranked.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    ranked
}

/// Percentage share rounded to 1 decimal, `0` when `total` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn share_percentage(minutes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    bucket::round_to(minutes as f64 / total as f64 * 100.0, 1)
}

/// Peak hours for the metrics grid: the three busiest hours by event
/// count, as bare hour numbers.
///
/// Ranking takes the top three slots first and drops empty ones after, so
/// fewer than three entries come back when under three hours saw events.
#[must_use]
pub fn busiest_hours(counts: &HourCounts) -> Vec<u8> {
    let mut ranked = counts.entries().to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(3)
        .filter(|&(_, count)| count > 0)
        .map(|(hour, _)| hour)
        .collect()
}

/// Peak hours for the performance panel: hours with any focus minutes,
/// ranked by minutes descending, capped at five, each labeled.
#[must_use]
pub fn peak_performance_hours(minutes: &HourMinutes) -> Vec<PeakHour> {
    let mut ranked: Vec<_> = minutes
        .entries()
        .into_iter()
        .filter(|&(_, m)| m > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(5)
        .map(|(hour, focus_minutes)| PeakHour {
            hour,
            label: bucket::hour_label(hour),
            focus_minutes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(entries: &[(&str, u64)]) -> LabelTotals {
        let mut totals = LabelTotals::default();
        for &(label, minutes) in entries {
            totals.add(label, minutes);
        }
        totals
    }

    #[test]
    fn top_distractions_sorts_and_caps() {
        let totals = labels(&[("Slack", 10), ("YouTube", 45), ("News", 20), ("Email", 5)]);
        let top = top_distractions(&totals, 3);
        let ranked: Vec<_> = top.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(ranked, vec!["YouTube", "News", "Slack"]);
    }

    #[test]
    fn top_distractions_breaks_ties_by_insertion_order() {
        let totals = labels(&[("Zebra", 30), ("Apple", 30)]);
        let top = top_distractions(&totals, 3);
        assert_eq!(top[0].label, "Zebra");
        assert_eq!(top[1].label, "Apple");
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact decimals expected after rounding")]
    fn sources_carry_rounded_percentages() {
        let totals = labels(&[("YouTube", 20), ("Slack", 10)]);
        let sources = distraction_sources(&totals);
        assert_eq!(sources[0].percentage, 66.7);
        assert_eq!(sources[1].percentage, 33.3);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact decimals expected after rounding")]
    fn zero_total_means_zero_percentage() {
        assert_eq!(share_percentage(0, 0), 0.0);
        assert_eq!(share_percentage(10, 0), 0.0);
    }

    #[test]
    fn percentages_are_bounded_and_sum_to_roughly_100() {
        let totals = labels(&[("A", 7), ("B", 11), ("C", 13), ("D", 3)]);
        let sources = distraction_sources(&totals);
        let sum: f64 = sources.iter().map(|s| s.percentage).sum();
        for source in &sources {
            assert!(source.percentage >= 0.0 && source.percentage <= 100.0);
        }
        assert!((sum - 100.0).abs() < 0.2);
    }

    #[test]
    fn busiest_hours_drops_empty_slots_after_slicing() {
        let mut counts = HourCounts::default();
        counts.add(9);
        counts.add(9);
        counts.add(14);
        // Only two hours have events: slice keeps three slots, the filter
        // then removes the zero-count one.
        assert_eq!(busiest_hours(&counts), vec![9, 14]);
    }

    #[test]
    fn busiest_hours_is_empty_without_events() {
        assert!(busiest_hours(&HourCounts::default()).is_empty());
    }

    #[test]
    fn peak_performance_filters_then_caps_at_five() {
        let mut minutes = HourMinutes::default();
        for (hour, m) in [(6, 10), (8, 60), (9, 55), (10, 40), (13, 25), (15, 30)] {
            minutes.add(hour, m);
        }
        let peaks = peak_performance_hours(&minutes);
        assert_eq!(peaks.len(), 5);
        assert_eq!(peaks[0].hour, 8);
        assert_eq!(peaks[0].label, "8am");
        assert_eq!(peaks[0].focus_minutes, 60);
        // The smallest entry (6am, 10 minutes) fell off the cap
        assert!(peaks.iter().all(|p| p.hour != 6));
    }

    #[test]
    fn the_two_peak_hour_variants_can_disagree() {
        // Hour 9: many short events. Hour 14: one long focus block.
        let mut counts = HourCounts::default();
        let mut minutes = HourMinutes::default();
        for _ in 0..5 {
            counts.add(9);
            minutes.add(9, 5);
        }
        counts.add(14);
        minutes.add(14, 90);

        let by_count = busiest_hours(&counts);
        let by_minutes = peak_performance_hours(&minutes);

        assert_eq!(by_count[0], 9);
        assert_eq!(by_minutes[0].hour, 14);
    }
}
