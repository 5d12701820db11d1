//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use ft_core::kind::{EventKind, Impact, TaskResolution, TaskStatus};

/// Focus tracker.
///
/// Logs focus and distraction time, tracks tasks, and derives weekly
/// analytics (trends, peak hours, distraction costs) from the local log.
#[derive(Debug, Parser)]
#[command(name = "ft", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log a focus or distraction block.
    Log {
        /// What kind of time this was.
        #[arg(value_enum)]
        kind: KindArg,

        /// Source or activity label, e.g. "Deep work" or "YouTube".
        label: String,

        /// Duration in minutes.
        minutes: u32,
    },

    /// Edit a logged event's label and minutes.
    Edit {
        /// Event id.
        id: String,

        /// New label.
        label: String,

        /// New duration in minutes.
        minutes: u32,
    },

    /// Delete a logged event.
    Delete {
        /// Event id.
        id: String,
    },

    /// List recent events, newest first.
    Events {
        /// Maximum number of events to show.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Manage tasks.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Show the procrastination analyzer summary.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show dashboard stats with 7-day sparklines.
    Dashboard {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the weekly analytics panel.
    Analytics {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate an N-day report with per-day rows.
    Report {
        /// Number of days to cover (1-30).
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Project the weekly cost of distraction time.
    Cost {
        /// Hourly rate used for the projection.
        #[arg(long)]
        rate: Option<f64>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show recent distractions from the last 24 hours.
    Stoppages {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Task subcommands.
#[derive(Debug, Subcommand)]
pub enum TaskAction {
    /// Add a new active task.
    Add {
        /// Task title.
        title: String,

        /// Free-text category, defaults to "General".
        #[arg(long, default_value = "")]
        category: String,

        /// Days from now until the task is due.
        #[arg(long, default_value_t = 1)]
        due_in_days: u32,

        /// How much the task matters if it slips.
        #[arg(long, value_enum, default_value_t = ImpactArg::Medium)]
        impact: ImpactArg,
    },

    /// Mark a task done.
    Done {
        /// Task id.
        id: String,
    },

    /// Resolve a task as completed or not completed.
    Resolve {
        /// Task id.
        id: String,

        #[arg(value_enum)]
        resolution: ResolutionArg,
    },

    /// List tasks with a given status.
    List {
        /// Status to filter by.
        #[arg(long, value_enum, default_value_t = StatusArg::Active)]
        status: StatusArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Focus,
    Distraction,
}

impl From<KindArg> for EventKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Focus => Self::Focus,
            KindArg::Distraction => Self::Distraction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImpactArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<ImpactArg> for Impact {
    fn from(arg: ImpactArg) -> Self {
        match arg {
            ImpactArg::Low => Self::Low,
            ImpactArg::Medium => Self::Medium,
            ImpactArg::High => Self::High,
            ImpactArg::Critical => Self::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolutionArg {
    Completed,
    NotCompleted,
}

impl From<ResolutionArg> for TaskResolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::Completed => Self::Completed,
            ResolutionArg::NotCompleted => Self::NotCompleted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Done,
    Overdue,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => Self::Active,
            StatusArg::Done => Self::Done,
            StatusArg::Overdue => Self::Overdue,
        }
    }
}
