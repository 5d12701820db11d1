//! Focus tracker CLI library.
//!
//! This crate provides the CLI interface for the focus tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ImpactArg, KindArg, ResolutionArg, StatusArg, TaskAction};
pub use config::Config;
