//! Day-indexed series builders for sparklines.
//!
//! Every series is a zero-initialized array of `days` slots, index 0 being
//! the window start day, ascending chronologically.

use crate::reduce;
use crate::score;
use crate::types::{ActivityEvent, Task};

/// Focus minutes per day.
#[must_use]
pub fn focus_minutes_by_day(events: &[ActivityEvent], window_start: i64, days: usize) -> Vec<u64> {
    reduce::bucket_by_day(
        events,
        window_start,
        days,
        |e| e.created_at,
        |e| if e.is_focus() { u64::from(e.minutes) } else { 0 },
    )
}

/// Distraction minutes per day.
#[must_use]
pub fn distraction_minutes_by_day(
    events: &[ActivityEvent],
    window_start: i64,
    days: usize,
) -> Vec<u64> {
    reduce::bucket_by_day(
        events,
        window_start,
        days,
        |e| e.created_at,
        |e| {
            if e.is_distraction() {
                u64::from(e.minutes)
            } else {
                0
            }
        },
    )
}

/// Distraction event counts per day.
#[must_use]
pub fn distraction_counts_by_day(
    events: &[ActivityEvent],
    window_start: i64,
    days: usize,
) -> Vec<u64> {
    reduce::bucket_by_day(
        events,
        window_start,
        days,
        |e| e.created_at,
        |e| u64::from(e.is_distraction()),
    )
}

/// Completed tasks per day, bucketed by each task's creation time.
///
/// There is no completion timestamp in the data model, so this counts
/// currently-done tasks by the day they were created.
#[must_use]
pub fn tasks_completed_by_day(done_tasks: &[Task], window_start: i64, days: usize) -> Vec<u64> {
    reduce::bucket_by_day(done_tasks, window_start, days, |t| t.created_at, |_| 1)
}

/// Per-day productivity scores from the two minute series.
///
/// A day with no minutes at all scores zero.
#[must_use]
pub fn productivity_by_day(focus_by_day: &[u64], distraction_by_day: &[u64]) -> Vec<u8> {
    focus_by_day
        .iter()
        .zip(distraction_by_day)
        .map(|(&focus, &distraction)| score::productivity_score(focus, distraction))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::{DAY_MS, HOUR_MS, hour_bucket};
    use crate::kind::{EventKind, Impact, TaskStatus};

    const START: i64 = 100 * DAY_MS;

    fn event(kind: EventKind, minutes: u32, created_at: i64) -> ActivityEvent {
        ActivityEvent {
            id: format!("evt-{created_at}"),
            kind,
            label: "X".to_string(),
            minutes,
            created_at,
            hour_bucket: Some(hour_bucket(created_at)),
        }
    }

    fn done_task(created_at: i64) -> Task {
        Task {
            id: format!("task-{created_at}"),
            title: "T".to_string(),
            category: "General".to_string(),
            due_date: created_at + DAY_MS,
            impact: Impact::Low,
            status: TaskStatus::Done,
            created_at,
        }
    }

    #[test]
    fn series_are_zero_initialized_with_fixed_length() {
        assert_eq!(focus_minutes_by_day(&[], START, 7), vec![0; 7]);
        assert_eq!(tasks_completed_by_day(&[], START, 30).len(), 30);
    }

    #[test]
    fn minutes_split_by_kind_per_day() {
        let events = vec![
            event(EventKind::Focus, 50, START + HOUR_MS),
            event(EventKind::Distraction, 20, START + HOUR_MS),
            event(EventKind::Focus, 30, START + 3 * DAY_MS),
        ];
        assert_eq!(
            focus_minutes_by_day(&events, START, 7),
            vec![50, 0, 0, 30, 0, 0, 0]
        );
        assert_eq!(
            distraction_minutes_by_day(&events, START, 7),
            vec![20, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            distraction_counts_by_day(&events, START, 7),
            vec![1, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn out_of_window_events_contribute_nothing() {
        let events = vec![
            event(EventKind::Focus, 10, START - 1),
            event(EventKind::Focus, 10, START + 7 * DAY_MS),
        ];
        assert_eq!(focus_minutes_by_day(&events, START, 7), vec![0; 7]);
    }

    #[test]
    fn completions_bucket_by_creation_day() {
        let tasks = vec![
            done_task(START + HOUR_MS),
            done_task(START + HOUR_MS * 2),
            done_task(START + 5 * DAY_MS),
        ];
        assert_eq!(
            tasks_completed_by_day(&tasks, START, 7),
            vec![2, 0, 0, 0, 0, 1, 0]
        );
    }

    #[test]
    fn productivity_series_scores_each_day() {
        let focus = vec![45, 0, 60];
        let distraction = vec![15, 0, 60];
        assert_eq!(productivity_by_day(&focus, &distraction), vec![75, 0, 50]);
    }
}
