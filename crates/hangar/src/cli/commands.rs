//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Port to serve the dashboard on (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Up (bootstrap) command arguments.
#[derive(Debug, Args)]
pub struct UpCommand {
    /// Skip installing missing game-server packages
    #[arg(long)]
    pub no_install: bool,

    /// Don't open a browser tab at the dashboard
    #[arg(long)]
    pub no_browser: bool,
}

/// Launch command arguments.
#[derive(Debug, Args)]
pub struct LaunchCommand {
    /// Don't open a browser tab at the game URL
    #[arg(long)]
    pub no_browser: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
