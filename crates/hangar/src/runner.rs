//! The bootstrap runner.
//!
//! `hangar up` is the one-command path: make sure the external dependencies
//! are in place, start the dashboard presenter as a subprocess, open a
//! browser tab at it, and supervise the child until Ctrl-C. The same
//! supervision is reused by `hangar launch` for the game server, so the
//! whole startup story lives in one parameterized routine.

use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::preflight::{Preflight, ToolInvoker};
use crate::process::{self, ServiceHandle, ServiceSpec, UrlOpener};

/// Service name used in logs and errors for the dashboard child.
pub const DASHBOARD_SERVICE_NAME: &str = "dashboard";

/// Build the dashboard presenter's [`ServiceSpec`].
///
/// Uses `bootstrap.dashboard_command` when configured, otherwise the current
/// executable with `serve`. `forward_args` (the parent's `--config` path and
/// verbosity flags) are appended to the default command only, so the child
/// `serve` loads the same configuration the parent computed its URL from; a
/// configured command is taken verbatim.
///
/// # Errors
///
/// Returns an error if the current executable path cannot be resolved or a
/// configured command is empty.
pub fn dashboard_spec(config: &Config, forward_args: &[String]) -> Result<ServiceSpec> {
    let command = match &config.bootstrap.dashboard_command {
        Some(command) => command.clone(),
        None => {
            let exe = std::env::current_exe()?;
            let mut command = vec![exe.to_string_lossy().into_owned(), "serve".to_string()];
            command.extend(forward_args.iter().cloned());
            command
        }
    };

    let (program, args) = command.split_first().ok_or_else(|| Error::ConfigValidation {
        message: "bootstrap.dashboard_command must not be an empty list".to_string(),
    })?;

    Ok(
        ServiceSpec::new(DASHBOARD_SERVICE_NAME, program, config.dashboard_url())
            .args(args.to_vec())
            .startup_delay(config.dashboard_startup_wait()),
    )
}

/// Start the dashboard presenter as a subprocess.
///
/// Runs the shared startup routine; when `dashboard.open_browser` is off the
/// fixed wait still happens but no tab is opened.
///
/// # Errors
///
/// Returns an error if the spawn or the browser open fails.
pub async fn start_dashboard(
    config: &Config,
    opener: &dyn UrlOpener,
    forward_args: &[String],
) -> Result<ServiceHandle> {
    let spec = dashboard_spec(config, forward_args)?;

    if config.dashboard.open_browser {
        process::launch_and_open(spec, opener).await
    } else {
        let handle = process::start(spec)?;
        tokio::time::sleep(handle.spec().startup_delay).await;
        Ok(handle)
    }
}

/// Block until Ctrl-C, then terminate the child exactly once.
///
/// # Errors
///
/// Returns an error if the interrupt handler cannot be installed or the
/// child could not be stopped.
pub async fn supervise(handle: ServiceHandle) -> Result<()> {
    info!(
        service = %handle.spec().name,
        url = %handle.url(),
        "running; press Ctrl-C to stop"
    );
    tokio::signal::ctrl_c().await?;

    let name = handle.spec().name.clone();
    handle.shutdown().await?;
    info!(service = %name, "stopped");
    Ok(())
}

/// The full bootstrap: preflight, start the dashboard, supervise it.
///
/// # Errors
///
/// Returns an error if preflight fails (missing tool, failed install), the
/// dashboard cannot be started, or shutdown fails.
pub async fn up(
    config: &Config,
    opener: &dyn UrlOpener,
    invoker: &dyn ToolInvoker,
    forward_args: &[String],
) -> Result<()> {
    Preflight::new(config.game_dir(), config.bootstrap.auto_install, invoker).ensure()?;
    let handle = start_dashboard(config, opener, forward_args).await?;
    supervise(handle).await
}
