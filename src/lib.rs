//! rundb - run database helpers.
//!
//! Typed access to run metadata from the run-info catalog and to trigger
//! configuration and trending values in the DAQ database, plus the week
//! index used to group runs into weekly cohorts.

#![warn(missing_docs)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod daq;
pub mod error;
pub mod run;
pub mod utils;
pub mod week;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, QueryCommand};
use config::{Config, load_config, resolve_config_path, save_config};
use run::{DefaultRunDatabase, RunNumber};
use std::path::{Path, PathBuf};
use tracing::info;

pub use error::{Error, Result};
pub use run::{RunDatabase, RunSummary, SourcePosition, open};
pub use week::WeekCalendar;

/// Main entry point for the rundb CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet);

    let config_path = cli.global.config.as_deref();
    match cli.command {
        Command::Config { action } => handle_config_command(action, config_path),
        Command::Query(query) => {
            let config = load_config(config_path)?;
            let db = open(&config)?;
            handle_query_command(query, &db)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // Query results go to stdout, so logs stay on stderr.
    let filter_str = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_query_command(command: QueryCommand, db: &DefaultRunDatabase) -> Result<()> {
    match command {
        QueryCommand::RunType { run } => println!("{}", db.run_type(run)?),
        QueryCommand::StartTime { run } => {
            println!("{}", utils::date::format_timestamp(&db.start_time(run)?));
        }
        QueryCommand::Week { run } => println!("{}", db.week_of_run(run)?),
        QueryCommand::WeekOfDate { timestamp } => println!("{}", db.week_of_date_str(&timestamp)?),
        QueryCommand::SourceLocation { run } => println!("{}", db.source_location(run)?),
        QueryCommand::SourceType { run } => println!("{}", db.source_type(run)?),
        QueryCommand::Purity { run } => println!("{}", db.purity(run)?),
        QueryCommand::ComptonLocation { run } => println!("{}", db.compton_source_location(run)?),
        QueryCommand::TriggerFile { run, output } => write_trigger_file(db, run, output)?,
        QueryCommand::Summary { run, json } => {
            let summary = db.summary(run)?;
            if json {
                let text = serde_json::to_string_pretty(&summary).map_err(|e| Error::Internal {
                    message: format!("Failed to serialize summary: {e}"),
                })?;
                println!("{text}");
            } else {
                println!("{summary}");
            }
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn write_trigger_file(db: &DefaultRunDatabase, run: RunNumber, output: Option<PathBuf>) -> Result<()> {
    let file = db.trigger_file(run)?;
    match output {
        Some(path) => {
            std::fs::write(&path, file)?;
            info!("Trigger file of run {} written to {}", run, path.display());
        }
        None => println!("{file}"),
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = resolve_config_path(explicit)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
                println!("\nNext steps:");
                println!("  set catalog.base_url and daq.database, then run 'rundb summary <run>'");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(explicit)?;
            let text = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = resolve_config_path(explicit)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
