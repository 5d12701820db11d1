//! Task management commands.

use std::fmt::Write;

use anyhow::{Context, Result};
use ft_core::bucket::DAY_MS;
use ft_core::kind::{Impact, TaskResolution, TaskStatus};
use ft_core::types::Task;
use ft_db::Database;

use super::util;

/// Adds a new active task due `due_in_days` from now.
pub fn add(
    db: &Database,
    user: &str,
    title: &str,
    category: &str,
    due_in_days: u32,
    impact: Impact,
    now: i64,
) -> Result<()> {
    let due_date = now + i64::from(due_in_days) * DAY_MS;
    let task = db
        .create_task(user, title, category, due_date, impact, now)
        .context("failed to create task")?;
    println!(
        "Added \"{}\" [{}] {} as {}",
        task.title,
        task.category,
        util::describe_due(task.due_date, now),
        task.id
    );
    Ok(())
}

/// Marks a task done.
pub fn done(db: &Database, user: &str, id: &str) -> Result<()> {
    db.complete_task(user, id).context("failed to complete task")?;
    println!("Completed {id}");
    Ok(())
}

/// Resolves a task as completed or not completed.
pub fn resolve(db: &Database, user: &str, id: &str, resolution: TaskResolution) -> Result<()> {
    db.resolve_task(user, id, resolution)
        .context("failed to resolve task")?;
    println!("Resolved {id} as {resolution}");
    Ok(())
}

/// Lists tasks with the given status, soonest due first.
pub fn list(db: &Database, user: &str, status: TaskStatus, now: i64) -> Result<()> {
    let tasks = db
        .tasks_with_status(user, status)
        .context("failed to list tasks")?;
    print!("{}", render_list(&tasks, status, now));
    Ok(())
}

fn render_list(tasks: &[Task], status: TaskStatus, now: i64) -> String {
    let mut output = String::new();
    if tasks.is_empty() {
        writeln!(output, "No {status} tasks.").unwrap();
        return output;
    }
    for task in tasks {
        writeln!(
            output,
            "{:<9}  {:<24}  [{}]  {}  ({})",
            task.impact.as_str(),
            task.title,
            task.category,
            util::describe_due(task.due_date, now),
            task.id
        )
        .unwrap();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_list_handles_empty() {
        let output = render_list(&[], TaskStatus::Active, 0);
        assert!(output.contains("No active tasks."));
    }

    #[test]
    fn render_list_marks_overdue_tasks() {
        let db = Database::open_in_memory().expect("open db");
        let now = 10 * DAY_MS;
        db.create_task("local", "File report", "admin", now - DAY_MS, Impact::High, now - 2 * DAY_MS)
            .expect("create");

        let tasks = db.tasks_with_status("local", TaskStatus::Active).expect("list");
        let output = render_list(&tasks, TaskStatus::Active, now);

        assert!(output.contains("File report"));
        assert!(output.contains("overdue by 1d"));
        assert!(output.contains("high"));
    }
}
