use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ft_cli::commands::{analytics, cost, dashboard, events, report, stats, stoppages, task};
use ft_cli::{Cli, Commands, Config, TaskAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(ft_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = ft_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let now = chrono::Utc::now().timestamp_millis();

    match &cli.command {
        Some(Commands::Log {
            kind,
            label,
            minutes,
        }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            events::log(&db, &config.user, (*kind).into(), label, *minutes, now)?;
        }
        Some(Commands::Edit { id, label, minutes }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            events::edit(&db, &config.user, id, label, *minutes, now)?;
        }
        Some(Commands::Delete { id }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            events::delete(&db, &config.user, id)?;
        }
        Some(Commands::Events { limit }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            events::list(&db, &config.user, *limit)?;
        }
        Some(Commands::Task { action }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            match action {
                TaskAction::Add {
                    title,
                    category,
                    due_in_days,
                    impact,
                } => task::add(
                    &db,
                    &config.user,
                    title,
                    category,
                    *due_in_days,
                    (*impact).into(),
                    now,
                )?,
                TaskAction::Done { id } => task::done(&db, &config.user, id)?,
                TaskAction::Resolve { id, resolution } => {
                    task::resolve(&db, &config.user, id, (*resolution).into())?;
                }
                TaskAction::List { status } => {
                    task::list(&db, &config.user, (*status).into(), now)?;
                }
            }
        }
        Some(Commands::Stats { json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            stats::run(&db, &config.user, *json, now)?;
        }
        Some(Commands::Dashboard { json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            dashboard::run(&db, &config.user, *json, now)?;
        }
        Some(Commands::Analytics { json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            analytics::run(&db, &config.user, *json, now)?;
        }
        Some(Commands::Report { days, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            report::run(&db, &config.user, *days, *json, now)?;
        }
        Some(Commands::Cost { rate, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            cost::run(&db, &config.user, *rate, *json, now)?;
        }
        Some(Commands::Stoppages { json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            stoppages::run(&db, &config.user, *json, now)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
