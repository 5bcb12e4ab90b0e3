//! Command-line interface for hangar.
//!
//! This module provides the CLI structure and command handlers for the
//! `hangar` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, LaunchCommand, ServeCommand, UpCommand};

/// hangar - Dashboard and launcher for the Flight Simulator
///
/// Serves a local dashboard page with a launch button, spawns the external
/// game server, and opens the right browser tabs, so one command gets you
/// flying.
#[derive(Debug, Parser)]
#[command(name = "hangar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
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
    /// Run the dashboard presenter in the foreground
    Serve(ServeCommand),

    /// Bootstrap everything: preflight, dashboard, browser tab
    Up(UpCommand),

    /// Start the game server directly and open its URL
    Launch(LaunchCommand),

    /// View or validate configuration
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
}
