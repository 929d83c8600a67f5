//! Command-line argument definitions for the Big Year engine
//!
//! This module defines the CLI interface using the clap derive API. Global
//! options (configuration file, data directory, verbosity) apply to every
//! subcommand.

use crate::app::services::species_aggregator::SpeciesSort;
use crate::app::models::UserId;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the Big Year leaderboard engine
///
/// Imports eBird "MyEBirdData.csv" exports, serves the leaderboard API and
/// prints standings from the local snapshot.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bigyear",
    version,
    about = "Big Year birding competition: eBird CSV import, dedup and species leaderboard",
    long_about = "Runs a calendar-year birding competition from eBird personal data exports. \
                  Uploads are parsed, filtered to countable species, deduplicated against \
                  earlier uploads and ranked on a competition leaderboard with per-user \
                  privacy settings. State is kept in memory and snapshotted to Parquet."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Snapshot directory; overrides the configuration file and environment
    #[arg(
        long = "data-dir",
        value_name = "PATH",
        global = true,
        help = "Directory holding the Parquet snapshot"
    )]
    pub data_dir: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress output except errors"
    )]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Log level from the verbosity flags, starting at `default` with no flags
    pub fn get_log_level(&self, default: &'static str) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => default,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Progress bars are hidden in quiet mode
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Import eBird exports for a participant without going through the API
    Import(ImportArgs),
    /// Print the leaderboard
    Leaderboard(LeaderboardArgs),
    /// Print a participant's species list
    Species(SpeciesArgs),
}

impl Commands {
    /// Default log level when no verbosity flag is given
    pub fn default_log_level(&self) -> &'static str {
        match self {
            // magic links are delivered through the log while serving
            Commands::Serve(_) => "info",
            Commands::Import(_) | Commands::Leaderboard(_) | Commands::Species(_) => "warn",
        }
    }
}

/// Output format for printed results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored table
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Default, Parser)]
pub struct ServeArgs {
    /// Socket address to listen on, e.g. 127.0.0.1:8000
    #[arg(short = 'b', long = "bind", value_name = "ADDR")]
    pub bind_address: Option<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// eBird export file, or a directory searched recursively for .csv files
    #[arg(value_name = "PATH")]
    pub input_path: PathBuf,

    /// Participant email; the participant is registered when unknown
    #[arg(short = 'e', long = "email", value_name = "EMAIL")]
    pub email: String,
}

impl ImportArgs {
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Parser)]
pub struct LeaderboardArgs {
    /// Competition year; defaults to the configured year
    #[arg(short = 'y', long = "year")]
    pub year: Option<i32>,

    /// Number of rows to show
    #[arg(short = 'n', long = "limit")]
    pub limit: Option<usize>,

    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Parser)]
pub struct SpeciesArgs {
    /// Participant id as shown on the leaderboard
    #[arg(value_name = "USER_ID")]
    pub user_id: UserId,

    /// Competition year; defaults to the configured year
    #[arg(short = 'y', long = "year")]
    pub year: Option<i32>,

    /// Sort order: name or date
    #[arg(short = 's', long = "sort", default_value = "name")]
    pub sort: String,

    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

impl SpeciesArgs {
    pub fn validate(&self) -> Result<()> {
        self.sort.parse::<SpeciesSort>().map(|_| ())
    }
}
