//! Per-category task delay analysis.

use serde::Serialize;

use crate::bucket::{self, DAY_MS};
use crate::types::Task;

/// Average overdue delay for one task category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayPattern {
    pub category: String,
    /// Average days past due, rounded to 1 decimal.
    pub avg_delay_days: f64,
}

/// Per-category average delay for tasks past their due date.
///
/// Delay is fractional days of `now - due_date`, regardless of stored
/// status. Tasks due at or after `now` are excluded entirely, never
/// zero-filled. Output is sorted by average delay descending, ties keeping
/// first-seen category order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn delay_patterns(tasks: &[Task], now: i64) -> Vec<DelayPattern> {
    struct Acc {
        category: String,
        total_days: f64,
        count: u32,
    }

    let mut groups: Vec<Acc> = Vec::new();
    for task in tasks {
        if task.due_date >= now {
            continue;
        }
        let delay_days = (now - task.due_date) as f64 / DAY_MS as f64;
        if let Some(group) = groups.iter_mut().find(|g| g.category == task.category) {
            group.total_days += delay_days;
            group.count += 1;
        } else {
            groups.push(Acc {
                category: task.category.clone(),
                total_days: delay_days,
                count: 1,
            });
        }
    }

    let mut patterns: Vec<_> = groups
        .into_iter()
        .map(|g| DelayPattern {
            category: g.category,
            avg_delay_days: bucket::round_to(g.total_days / f64::from(g.count), 1),
        })
        .collect();
    patterns.sort_by(|a, b| {
        b.avg_delay_days
            .partial_cmp(&a.avg_delay_days)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Impact, TaskStatus};

    fn task(category: &str, due_date: i64, status: TaskStatus) -> Task {
        Task {
            id: format!("task-{category}-{due_date}"),
            title: "Untitled".to_string(),
            category: category.to_string(),
            due_date,
            impact: Impact::Medium,
            status,
            created_at: 0,
        }
    }

    #[test]
    fn averages_delay_per_category() {
        let now = 10 * DAY_MS;
        let tasks = vec![
            task("admin", now - DAY_MS, TaskStatus::Active),
            task("admin", now - 3 * DAY_MS, TaskStatus::Active),
        ];
        let patterns = delay_patterns(&tasks, now);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].category, "admin");
        assert!((patterns[0].avg_delay_days - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn excludes_future_tasks_entirely() {
        let now = 10 * DAY_MS;
        let tasks = vec![
            task("admin", now, TaskStatus::Active),
            task("admin", now + DAY_MS, TaskStatus::Active),
        ];
        assert!(delay_patterns(&tasks, now).is_empty());
    }

    #[test]
    fn delay_ignores_stored_status() {
        // A done task past its due date still counts; delay is derived
        // purely from the due date.
        let now = 10 * DAY_MS;
        let tasks = vec![task("writing", now - 2 * DAY_MS, TaskStatus::Done)];
        let patterns = delay_patterns(&tasks, now);
        assert_eq!(patterns.len(), 1);
        assert!((patterns[0].avg_delay_days - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sorts_descending_by_average_delay() {
        let now = 10 * DAY_MS;
        let tasks = vec![
            task("light", now - DAY_MS, TaskStatus::Active),
            task("heavy", now - 5 * DAY_MS, TaskStatus::Active),
        ];
        let patterns = delay_patterns(&tasks, now);
        assert_eq!(patterns[0].category, "heavy");
        assert_eq!(patterns[1].category, "light");
    }

    #[test]
    fn rounds_fractional_delays_to_one_decimal() {
        let now = 10 * DAY_MS;
        // 1.25 days overdue
        let tasks = vec![task("admin", now - DAY_MS - 6 * 60 * 60 * 1000, TaskStatus::Active)];
        let patterns = delay_patterns(&tasks, now);
        assert!((patterns[0].avg_delay_days - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_yields_no_patterns() {
        assert!(delay_patterns(&[], DAY_MS).is_empty());
    }
}
