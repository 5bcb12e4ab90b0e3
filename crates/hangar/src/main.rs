//! `hangar` - CLI for the Flight Simulator dashboard and launcher
//!
//! This binary serves the dashboard page, bootstraps the whole stack, or
//! launches the external game server directly.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use hangar::cli::{Cli, Command, ConfigCommand, LaunchCommand};
use hangar::preflight::SystemInvoker;
use hangar::process::SystemOpener;
use hangar::{dashboard, init_logging, launcher, process, runner, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone())?;

    // Forward the parent's config path and verbosity so a child `serve`
    // binds the same address the browser tab is opened at.
    let forward = forward_args(&cli);

    // Execute the command
    match cli.command {
        Command::Serve(cmd) => {
            if let Some(port) = cmd.port {
                config.dashboard.port = port;
                config.validate()?;
            }
            dashboard::serve(config, Arc::new(SystemOpener)).await?;
        }
        Command::Up(cmd) => {
            if cmd.no_install {
                config.bootstrap.auto_install = false;
            }
            if cmd.no_browser {
                config.dashboard.open_browser = false;
            }
            runner::up(&config, &SystemOpener, &SystemInvoker, &forward).await?;
        }
        Command::Launch(cmd) => handle_launch(&config, &cmd).await?,
        Command::Config(cmd) => handle_config(&config, cmd)?,
    }
    Ok(())
}

/// CLI flags to pass along to a dashboard child spawned with the default
/// `serve` command.
fn forward_args(cli: &Cli) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(path) = &cli.config {
        args.push("--config".to_string());
        args.push(path.display().to_string());
    }
    if cli.quiet {
        args.push("--quiet".to_string());
    } else if cli.verbose > 0 {
        args.push(format!("-{}", "v".repeat(usize::from(cli.verbose))));
    }
    args
}

async fn handle_launch(config: &Config, cmd: &LaunchCommand) -> Result<()> {
    let handle = if cmd.no_browser {
        let handle = process::start(launcher::game_spec(config))?;
        tokio::time::sleep(handle.spec().startup_delay).await;
        handle
    } else {
        launcher::launch(config, &SystemOpener).await?
    };
    runner::supervise(handle).await?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Dashboard]");
                println!("  Address:            {}", config.dashboard_addr());
                println!(
                    "  Startup wait (ms):  {}",
                    config.dashboard.startup_wait_ms
                );
                println!("  Open browser:       {}", config.dashboard.open_browser);
                println!();
                println!("[Game]");
                println!(
                    "  Command:            {} {}",
                    config.game.program, config.game.entry
                );
                println!("  Directory:          {}", config.game_dir().display());
                println!("  URL:                {}", config.game.url);
                println!("  Startup wait (ms):  {}", config.game.startup_wait_ms);
                println!();
                println!("[Bootstrap]");
                println!("  Auto install:       {}", config.bootstrap.auto_install);
                match &config.bootstrap.dashboard_command {
                    Some(command) => {
                        println!("  Dashboard command:  {}", command.join(" "));
                    }
                    None => println!("  Dashboard command:  (current executable) serve"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
