//! Storage layer for the focus tracker.
//!
//! Provides persistence for activity events and tasks using `rusqlite`.
//! All reads and writes are scoped by `user_id`; the analytics engine in
//! `ft-core` only ever sees records that already passed that scope.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send`
//! but not `Sync`. For multi-threaded access use a `Mutex<Database>` or
//! one `Database` instance per thread.
//!
//! # Schema
//!
//! Timestamps are stored as epoch-millisecond INTEGER columns, matching
//! the unit every aggregation in `ft-core` computes with. Enum-ish columns
//! (`kind`, `impact`, `status`, `resolution`) store the canonical strings
//! from the `ft-core` enums; rows carrying anything else surface as
//! [`DbError::InvalidRecord`] at read time.

use std::path::Path;
use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use uuid::Uuid;

use ft_core::bucket;
use ft_core::kind::{EventKind, Impact, TaskResolution, TaskStatus};
use ft_core::types::{self, ActivityEvent, Task};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The requested record does not exist or belongs to another user.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    /// A stored row failed validation when mapped to a domain type.
    #[error("invalid {entity} record {id}: {message}")]
    InvalidRecord {
        entity: &'static str,
        id: String,
        message: String,
    },
}

impl DbError {
    fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    fn invalid(entity: &'static str, id: &str, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            entity,
            id: id.to_string(),
            message: message.into(),
        }
    }
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

#[derive(Debug)]
struct EventRow {
    id: String,
    kind: String,
    label: String,
    minutes: i64,
    created_at: i64,
    hour_bucket: Option<i64>,
}

#[derive(Debug)]
struct TaskRow {
    id: String,
    title: String,
    category: String,
    due_date: i64,
    impact: String,
    status: String,
    created_at: i64,
}

const EVENT_COLUMNS: &str = "id, kind, label, minutes, created_at, hour_bucket";
const TASK_COLUMNS: &str = "id, title, category, due_date, impact, status, created_at";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- Activity events: one row per logged focus/distraction block
            -- created_at/updated_at: epoch milliseconds
            -- hour_bucket: floor(created_at / 3600000) % 24, stamped at write time
            CREATE TABLE IF NOT EXISTS activity_events (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                label TEXT NOT NULL,
                minutes INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                hour_bucket INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_events_user_created
                ON activity_events(user_id, created_at);

            CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                category TEXT NOT NULL,
                due_date INTEGER NOT NULL,
                impact TEXT NOT NULL,
                status TEXT NOT NULL,
                resolution TEXT,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_user_status ON tasks(user_id, status);
            CREATE INDEX IF NOT EXISTS idx_tasks_user_due ON tasks(user_id, due_date);
            ",
        )?;
        Ok(())
    }

    /// Logs a new activity event at `now`, returning the stored record.
    ///
    /// The label is trimmed and defaulted when blank, and the hour bucket
    /// is stamped from `now` so reads never have to recompute it.
    pub fn log_event(
        &self,
        user_id: &str,
        kind: EventKind,
        label: &str,
        minutes: u32,
        now: i64,
    ) -> Result<ActivityEvent, DbError> {
        let id = Uuid::new_v4().to_string();
        let label = types::normalize_label(label);
        let hour_bucket = bucket::hour_bucket(now);
        self.conn.execute(
            "
            INSERT INTO activity_events
            (id, user_id, kind, label, minutes, created_at, updated_at, hour_bucket)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
            params![id, user_id, kind.as_str(), label, minutes, now, now, hour_bucket],
        )?;
        tracing::debug!(event_id = %id, kind = %kind, minutes, "logged activity event");
        Ok(ActivityEvent {
            id,
            kind,
            label,
            minutes,
            created_at: now,
            hour_bucket: Some(hour_bucket),
        })
    }

    /// Updates an event's label and minutes. `created_at` and the hour
    /// bucket are immutable; only `updated_at` moves.
    pub fn update_event(
        &self,
        user_id: &str,
        id: &str,
        label: &str,
        minutes: u32,
        now: i64,
    ) -> Result<(), DbError> {
        let label = types::normalize_label(label);
        let changed = self.conn.execute(
            "
            UPDATE activity_events
            SET label = ?, minutes = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            ",
            params![label, minutes, now, id, user_id],
        )?;
        if changed == 0 {
            return Err(DbError::not_found("activity event", id));
        }
        Ok(())
    }

    /// Deletes an event owned by `user_id`.
    pub fn delete_event(&self, user_id: &str, id: &str) -> Result<(), DbError> {
        let changed = self.conn.execute(
            "DELETE FROM activity_events WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        if changed == 0 {
            return Err(DbError::not_found("activity event", id));
        }
        tracing::debug!(event_id = %id, "deleted activity event");
        Ok(())
    }

    /// Fetches one event owned by `user_id`.
    pub fn get_event(&self, user_id: &str, id: &str) -> Result<ActivityEvent, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM activity_events WHERE id = ? AND user_id = ?"),
                params![id, user_id],
                event_row,
            )
            .optional()?;
        row.map_or_else(
            || Err(DbError::not_found("activity event", id)),
            event_from_row,
        )
    }

    /// Lists the newest events for a user, newest first, up to `limit`.
    pub fn list_events(&self, user_id: &str, limit: usize) -> Result<Vec<ActivityEvent>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {EVENT_COLUMNS}
            FROM activity_events
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "
        ))?;
        let rows = stmt.query_map(params![user_id, limit], event_row)?;
        collect_events(rows)
    }

    /// Lists events in the half-open range `[start, end)`, oldest first.
    ///
    /// An empty or inverted range yields no rows.
    pub fn events_in_range(
        &self,
        user_id: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<ActivityEvent>, DbError> {
        if end <= start {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {EVENT_COLUMNS}
            FROM activity_events
            WHERE user_id = ? AND created_at >= ? AND created_at < ?
            ORDER BY created_at ASC, id ASC
            "
        ))?;
        let rows = stmt.query_map(params![user_id, start, end], event_row)?;
        collect_events(rows)
    }

    /// Lists events at or after `since`, newest first, up to `limit`.
    /// Feeds the live-stoppages view.
    pub fn recent_events_desc(
        &self,
        user_id: &str,
        since: i64,
        limit: usize,
    ) -> Result<Vec<ActivityEvent>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {EVENT_COLUMNS}
            FROM activity_events
            WHERE user_id = ? AND created_at >= ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "
        ))?;
        let rows = stmt.query_map(params![user_id, since, limit], event_row)?;
        collect_events(rows)
    }

    /// Creates an active task, returning the stored record.
    pub fn create_task(
        &self,
        user_id: &str,
        title: &str,
        category: &str,
        due_date: i64,
        impact: Impact,
        now: i64,
    ) -> Result<Task, DbError> {
        let id = Uuid::new_v4().to_string();
        let title = types::normalize_title(title);
        let category = types::normalize_category(category);
        self.conn.execute(
            "
            INSERT INTO tasks (id, user_id, title, category, due_date, impact, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                id,
                user_id,
                title,
                category,
                due_date,
                impact.as_str(),
                TaskStatus::Active.as_str(),
                now
            ],
        )?;
        tracing::debug!(task_id = %id, %impact, "created task");
        Ok(Task {
            id,
            title,
            category,
            due_date,
            impact,
            status: TaskStatus::Active,
            created_at: now,
        })
    }

    /// Marks a task done. Completing an already-done task is a no-op.
    pub fn complete_task(&self, user_id: &str, id: &str) -> Result<(), DbError> {
        self.ensure_task_exists(user_id, id)?;
        self.conn.execute(
            "UPDATE tasks SET status = ? WHERE id = ? AND user_id = ?",
            params![TaskStatus::Done.as_str(), id, user_id],
        )?;
        Ok(())
    }

    /// Records how a task was resolved and moves it to the matching status.
    pub fn resolve_task(
        &self,
        user_id: &str,
        id: &str,
        resolution: TaskResolution,
    ) -> Result<(), DbError> {
        self.ensure_task_exists(user_id, id)?;
        self.conn.execute(
            "UPDATE tasks SET status = ?, resolution = ? WHERE id = ? AND user_id = ?",
            params![resolution.status().as_str(), resolution.as_str(), id, user_id],
        )?;
        Ok(())
    }

    /// Lists a user's tasks with the given stored status, oldest due first.
    pub fn tasks_with_status(
        &self,
        user_id: &str,
        status: TaskStatus,
    ) -> Result<Vec<Task>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE user_id = ? AND status = ?
            ORDER BY due_date ASC, id ASC
            "
        ))?;
        let rows = stmt.query_map(params![user_id, status.as_str()], task_row)?;
        collect_tasks(rows)
    }

    /// Lists active tasks whose due date has passed relative to `now`.
    pub fn overdue_tasks(&self, user_id: &str, now: i64) -> Result<Vec<Task>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE user_id = ? AND status = ? AND due_date < ?
            ORDER BY due_date ASC, id ASC
            "
        ))?;
        let rows = stmt.query_map(params![user_id, TaskStatus::Active.as_str(), now], task_row)?;
        collect_tasks(rows)
    }

    fn ensure_task_exists(&self, user_id: &str, id: &str) -> Result<(), DbError> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM tasks WHERE id = ? AND user_id = ?",
                params![id, user_id],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            return Err(DbError::not_found("task", id));
        }
        Ok(())
    }
}

fn event_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        kind: row.get(1)?,
        label: row.get(2)?,
        minutes: row.get(3)?,
        created_at: row.get(4)?,
        hour_bucket: row.get(5)?,
    })
}

fn task_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        due_date: row.get(3)?,
        impact: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn event_from_row(row: EventRow) -> Result<ActivityEvent, DbError> {
    let kind = EventKind::from_str(&row.kind)
        .map_err(|err| DbError::invalid("activity event", &row.id, err.to_string()))?;
    let minutes = u32::try_from(row.minutes)
        .map_err(|_| DbError::invalid("activity event", &row.id, "negative minutes"))?;
    let hour_bucket = match row.hour_bucket {
        Some(hour) => Some(
            u8::try_from(hour)
                .ok()
                .filter(|hour| *hour < 24)
                .ok_or_else(|| {
                    DbError::invalid("activity event", &row.id, "hour bucket out of range")
                })?,
        ),
        None => None,
    };
    Ok(ActivityEvent {
        id: row.id,
        kind,
        label: row.label,
        minutes,
        created_at: row.created_at,
        hour_bucket,
    })
}

fn task_from_row(row: TaskRow) -> Result<Task, DbError> {
    let impact = Impact::from_str(&row.impact)
        .map_err(|err| DbError::invalid("task", &row.id, err.to_string()))?;
    let status = TaskStatus::from_str(&row.status)
        .map_err(|err| DbError::invalid("task", &row.id, err.to_string()))?;
    Ok(Task {
        id: row.id,
        title: row.title,
        category: row.category,
        due_date: row.due_date,
        impact,
        status,
        created_at: row.created_at,
    })
}

fn collect_events(
    rows: impl Iterator<Item = rusqlite::Result<EventRow>>,
) -> Result<Vec<ActivityEvent>, DbError> {
    let mut events = Vec::new();
    for row in rows {
        events.push(event_from_row(row?)?);
    }
    Ok(events)
}

fn collect_tasks(
    rows: impl Iterator<Item = rusqlite::Result<TaskRow>>,
) -> Result<Vec<Task>, DbError> {
    let mut tasks = Vec::new();
    for row in rows {
        tasks.push(task_from_row(row?)?);
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ft_core::bucket::{DAY_MS, HOUR_MS};

    const USER: &str = "local";

    #[test]
    fn open_in_memory_database() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn schema_matches_data_model() {
        let db = Database::open_in_memory().expect("open in-memory db");

        let event_columns = table_columns(&db.conn, "activity_events");
        assert_eq!(
            event_columns,
            vec![
                "id",
                "user_id",
                "kind",
                "label",
                "minutes",
                "created_at",
                "updated_at",
                "hour_bucket",
            ]
        );

        let task_columns = table_columns(&db.conn, "tasks");
        assert_eq!(
            task_columns,
            vec![
                "id",
                "user_id",
                "title",
                "category",
                "due_date",
                "impact",
                "status",
                "resolution",
                "created_at",
            ]
        );
    }

    fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({table})"))
            .expect("prepare table_info");
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .expect("query table_info");
        rows.map(|row| row.expect("table_info row")).collect()
    }

    #[test]
    fn log_event_normalizes_label_and_stamps_hour() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let now = 9 * HOUR_MS + 30 * 60 * 1000;
        let event = db
            .log_event(USER, EventKind::Focus, "  Deep work  ", 50, now)
            .expect("log event");

        assert_eq!(event.label, "Deep work");
        assert_eq!(event.hour_bucket, Some(9));
        assert_eq!(event.created_at, now);

        let stored = db.get_event(USER, &event.id).expect("get event");
        assert_eq!(stored, event);
    }

    #[test]
    fn log_event_defaults_blank_label() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let event = db
            .log_event(USER, EventKind::Distraction, "   ", 10, HOUR_MS)
            .expect("log event");
        assert_eq!(event.label, "Untitled");
    }

    #[test]
    fn update_event_keeps_created_at_and_hour() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let now = 9 * HOUR_MS;
        let event = db
            .log_event(USER, EventKind::Focus, "Writing", 25, now)
            .expect("log event");

        db.update_event(USER, &event.id, "Editing", 40, now + HOUR_MS)
            .expect("update event");

        let stored = db.get_event(USER, &event.id).expect("get event");
        assert_eq!(stored.label, "Editing");
        assert_eq!(stored.minutes, 40);
        assert_eq!(stored.created_at, now);
        assert_eq!(stored.hour_bucket, Some(9));
    }

    #[test]
    fn event_access_is_scoped_by_user() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let event = db
            .log_event(USER, EventKind::Focus, "Writing", 25, HOUR_MS)
            .expect("log event");

        assert!(matches!(
            db.get_event("someone-else", &event.id),
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            db.update_event("someone-else", &event.id, "X", 1, HOUR_MS),
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            db.delete_event("someone-else", &event.id),
            Err(DbError::NotFound { .. })
        ));

        db.delete_event(USER, &event.id).expect("delete event");
        assert!(matches!(
            db.get_event(USER, &event.id),
            Err(DbError::NotFound { .. })
        ));
    }

    #[test]
    fn list_events_is_newest_first_with_limit() {
        let db = Database::open_in_memory().expect("open in-memory db");
        for i in 0..5 {
            db.log_event(USER, EventKind::Focus, &format!("e{i}"), 10, i * HOUR_MS)
                .expect("log event");
        }

        let events = db.list_events(USER, 3).expect("list events");
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].label, "e4");
        assert_eq!(events[2].label, "e2");
    }

    #[test]
    fn events_in_range_is_half_open() {
        let db = Database::open_in_memory().expect("open in-memory db");
        for i in 0..4 {
            db.log_event(USER, EventKind::Focus, &format!("e{i}"), 10, i * DAY_MS)
                .expect("log event");
        }

        let events = db.events_in_range(USER, DAY_MS, 3 * DAY_MS).expect("range");
        let labels: Vec<_> = events.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["e1", "e2"]);

        assert!(db.events_in_range(USER, DAY_MS, DAY_MS).expect("empty").is_empty());
        assert!(db.events_in_range(USER, DAY_MS, 0).expect("inverted").is_empty());
    }

    #[test]
    fn recent_events_desc_bounds_and_caps() {
        let db = Database::open_in_memory().expect("open in-memory db");
        for i in 0..5 {
            db.log_event(
                USER,
                EventKind::Distraction,
                &format!("e{i}"),
                5,
                i * HOUR_MS,
            )
            .expect("log event");
        }

        let events = db.recent_events_desc(USER, HOUR_MS, 3).expect("recent");
        let labels: Vec<_> = events.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["e4", "e3", "e2"]);
    }

    #[test]
    fn task_lifecycle() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let now = 10 * DAY_MS;
        let task = db
            .create_task(USER, " File report ", "", now + DAY_MS, Impact::High, now)
            .expect("create task");

        assert_eq!(task.title, "File report");
        assert_eq!(task.category, "General");
        assert_eq!(task.status, TaskStatus::Active);

        let active = db.tasks_with_status(USER, TaskStatus::Active).expect("active");
        assert_eq!(active.len(), 1);

        db.complete_task(USER, &task.id).expect("complete");
        // Completing again is a no-op, not an error
        db.complete_task(USER, &task.id).expect("complete again");

        let done = db.tasks_with_status(USER, TaskStatus::Done).expect("done");
        assert_eq!(done.len(), 1);
        assert!(db.tasks_with_status(USER, TaskStatus::Active).expect("active").is_empty());
    }

    #[test]
    fn resolve_task_maps_resolution_to_status() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let now = 10 * DAY_MS;
        let task = db
            .create_task(USER, "Slipped", "admin", now - DAY_MS, Impact::Low, now - 2 * DAY_MS)
            .expect("create task");

        db.resolve_task(USER, &task.id, TaskResolution::NotCompleted)
            .expect("resolve");

        let overdue = db.tasks_with_status(USER, TaskStatus::Overdue).expect("overdue");
        assert_eq!(overdue.len(), 1);

        let resolution: Option<String> = db
            .conn
            .query_row(
                "SELECT resolution FROM tasks WHERE id = ?",
                [&task.id],
                |row| row.get(0),
            )
            .expect("read resolution");
        assert_eq!(resolution.as_deref(), Some("not_completed"));
    }

    #[test]
    fn overdue_tasks_checks_due_date_and_status() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let now = 10 * DAY_MS;
        db.create_task(USER, "Past due", "admin", now - DAY_MS, Impact::High, now - 2 * DAY_MS)
            .expect("create task");
        db.create_task(USER, "On time", "admin", now + DAY_MS, Impact::High, now - 2 * DAY_MS)
            .expect("create task");
        let done = db
            .create_task(USER, "Finished", "admin", now - DAY_MS, Impact::High, now - 2 * DAY_MS)
            .expect("create task");
        db.complete_task(USER, &done.id).expect("complete");

        let overdue = db.overdue_tasks(USER, now).expect("overdue");
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].title, "Past due");
    }

    #[test]
    fn corrupt_rows_surface_as_invalid_record() {
        let db = Database::open_in_memory().expect("open in-memory db");
        db.conn
            .execute(
                "
                INSERT INTO activity_events
                (id, user_id, kind, label, minutes, created_at, updated_at, hour_bucket)
                VALUES ('bad', ?, 'idle', 'X', 10, 0, 0, 0)
                ",
                [USER],
            )
            .expect("insert raw row");

        let err = db.get_event(USER, "bad").unwrap_err();
        assert!(matches!(err, DbError::InvalidRecord { .. }));
        assert!(err.to_string().contains("unknown event kind"));
    }
}
