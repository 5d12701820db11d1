//! Record types the aggregator consumes.
//!
//! These mirror the storage schema: the core only ever reads them. Write
//! paths normalize free-text fields with the helpers at the bottom before
//! a record is persisted, but the aggregations stay defensive about blank
//! labels anyway.

use serde::{Deserialize, Serialize};

use crate::bucket;
use crate::kind::{EventKind, Impact, TaskStatus};

/// Fallback label for blank event labels and task titles.
pub const UNTITLED: &str = "Untitled";

/// Fallback category for blank task categories.
pub const GENERAL_CATEGORY: &str = "General";

/// A logged focus or distraction event, scoped to one user upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: String,
    pub kind: EventKind,
    /// Free-text source/category, e.g. "YouTube". Normally non-empty.
    pub label: String,
    /// Non-negative duration in minutes.
    pub minutes: u32,
    /// Epoch-millisecond creation time; immutable once created.
    pub created_at: i64,
    /// Hour-of-day bucket precomputed at write time. Absent on legacy rows.
    pub hour_bucket: Option<u8>,
}

impl ActivityEvent {
    /// The event's hour-of-day bucket.
    ///
    /// Prefers the stored bucket and recomputes from `created_at` with the
    /// same formula otherwise, so the two paths can never disagree.
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour_bucket
            .unwrap_or_else(|| bucket::hour_bucket(self.created_at))
    }

    #[must_use]
    pub const fn is_focus(&self) -> bool {
        matches!(self.kind, EventKind::Focus)
    }

    #[must_use]
    pub const fn is_distraction(&self) -> bool {
        matches!(self.kind, EventKind::Distraction)
    }
}

/// A task record, scoped to one user upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Epoch-millisecond due date.
    pub due_date: i64,
    pub impact: Impact,
    pub status: TaskStatus,
    pub created_at: i64,
}

impl Task {
    /// Whether the task is overdue relative to `now`.
    ///
    /// Overdue-ness is computed from the due date, never read from the
    /// stored status (which may carry a legacy `overdue` value).
    #[must_use]
    pub fn is_overdue(&self, now: i64) -> bool {
        self.status == TaskStatus::Active && self.due_date < now
    }
}

/// Trims an event label, falling back to [`UNTITLED`] when blank.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trims a task title, falling back to [`UNTITLED`] when blank.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    normalize_label(title)
}

/// Trims a task category, falling back to [`GENERAL_CATEGORY`] when blank.
#[must_use]
pub fn normalize_category(category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        GENERAL_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: EventKind, created_at: i64, hour_bucket: Option<u8>) -> ActivityEvent {
        ActivityEvent {
            id: "evt-1".to_string(),
            kind,
            label: "Deep work".to_string(),
            minutes: 25,
            created_at,
            hour_bucket,
        }
    }

    #[test]
    fn hour_prefers_stored_bucket() {
        let e = event(EventKind::Focus, 9 * bucket::HOUR_MS, Some(17));
        assert_eq!(e.hour(), 17);
    }

    #[test]
    fn hour_recomputes_when_absent() {
        let e = event(EventKind::Focus, 9 * bucket::HOUR_MS, None);
        assert_eq!(e.hour(), 9);
    }

    #[test]
    fn overdue_is_computed_from_due_date() {
        let mut task = Task {
            id: "task-1".to_string(),
            title: "File report".to_string(),
            category: "admin".to_string(),
            due_date: 1_000,
            impact: Impact::High,
            status: TaskStatus::Active,
            created_at: 0,
        };
        assert!(task.is_overdue(2_000));
        assert!(!task.is_overdue(1_000));
        assert!(!task.is_overdue(500));

        task.status = TaskStatus::Done;
        assert!(!task.is_overdue(2_000));
    }

    #[test]
    fn normalizers_fall_back_on_blank_input() {
        assert_eq!(normalize_label("  YouTube "), "YouTube");
        assert_eq!(normalize_label("   "), UNTITLED);
        assert_eq!(normalize_title(""), UNTITLED);
        assert_eq!(normalize_category(" admin"), "admin");
        assert_eq!(normalize_category(""), GENERAL_CATEGORY);
    }
}
