//! CLI subcommand implementations.

pub mod analytics;
pub mod cost;
pub mod dashboard;
pub mod events;
pub mod report;
pub mod stats;
pub mod stoppages;
pub mod task;
pub mod util;
