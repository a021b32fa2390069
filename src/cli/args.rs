//! CLI argument definitions.

use super::validators::parse_run_number;
use crate::run::RunNumber;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Look up run metadata, trending values and week indices.
#[derive(Debug, Parser)]
#[command(name = "rundb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Global options.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by all subcommands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config dir).
    #[arg(long, global = true, env = "RUNDB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: info, -vv: debug, -vvv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run lookups; these need the catalog and DAQ database.
    #[command(flatten)]
    Query(QueryCommand),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Lookups answered from the run database.
#[derive(Debug, Subcommand)]
pub enum QueryCommand {
    /// Print the run type.
    RunType {
        /// Run number.
        #[arg(value_parser = parse_run_number)]
        run: RunNumber,
    },
    /// Print the run start time (UTC).
    StartTime {
        /// Run number.
        #[arg(value_parser = parse_run_number)]
        run: RunNumber,
    },
    /// Print the week index of the run start.
    Week {
        /// Run number.
        #[arg(value_parser = parse_run_number)]
        run: RunNumber,
    },
    /// Print the week index of a UTC timestamp.
    WeekOfDate {
        /// Timestamp, e.g. `2012-01-15T08:00:00` or `2012-01-15`.
        timestamp: String,
    },
    /// Print the nominal source location of a source run.
    SourceLocation {
        /// Run number.
        #[arg(value_parser = parse_run_number)]
        run: RunNumber,
    },
    /// Print the source type of a source run.
    SourceType {
        /// Run number.
        #[arg(value_parser = parse_run_number)]
        run: RunNumber,
    },
    /// Print the electron lifetime of a source run.
    Purity {
        /// Run number.
        #[arg(value_parser = parse_run_number)]
        run: RunNumber,
    },
    /// Print the Compton-telescope source position of a thorium run.
    ComptonLocation {
        /// Run number.
        #[arg(value_parser = parse_run_number)]
        run: RunNumber,
    },
    /// Print the physics trigger configuration file.
    TriggerFile {
        /// Run number.
        #[arg(value_parser = parse_run_number)]
        run: RunNumber,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print everything known about a run.
    Summary {
        /// Run number.
        #[arg(value_parser = parse_run_number)]
        run: RunNumber,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}
