//! Command-line interface for flightsearch.
//!
//! This module provides the CLI structure for the `flights` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, OutputFormat, SearchCommand};

/// flights - Search flights and filter the results
///
/// Runs a search against the built-in flight source and narrows the results
/// by stops, airline and maximum price.
#[derive(Debug, Parser)]
#[command(name = "flights")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for flights and print the filtered results
    Search(SearchCommand),

    /// List the airlines offered as filters
    Airlines,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }

    /// Whether the command needs a loaded configuration.
    ///
    /// `config path` and `config validate` inspect the file themselves, so
    /// they run even when it fails to load.
    #[must_use]
    pub fn requires_config(&self) -> bool {
        !matches!(
            self.command,
            Command::Config(ConfigCommand::Path | ConfigCommand::Validate { .. })
        )
    }
}
