//! Launching the external flight-simulator server.
//!
//! The launcher is the action behind the dashboard's Launch button and the
//! `hangar launch` command: start `node server.js`, wait the fixed delay,
//! open the game URL in the browser. The simulator itself is an external
//! artifact; nothing here inspects it beyond spawning it.

use crate::config::Config;
use crate::error::Result;
use crate::process::{self, ServiceHandle, ServiceSpec, UrlOpener};

/// Service name used in logs and errors for the game server.
pub const GAME_SERVICE_NAME: &str = "game-server";

/// Build the game-server [`ServiceSpec`] from configuration.
#[must_use]
pub fn game_spec(config: &Config) -> ServiceSpec {
    ServiceSpec::new(GAME_SERVICE_NAME, &config.game.program, &config.game.url)
        .args([config.game.entry.clone()])
        .cwd(config.game_dir())
        .startup_delay(config.game_startup_wait())
}

/// Launch the game server and open its URL.
///
/// Runs the shared startup routine: spawn, fixed wait, browser open. A spawn
/// failure is returned without invoking the browser.
///
/// # Errors
///
/// Returns an error if the spawn or the browser open fails.
pub async fn launch(config: &Config, opener: &dyn UrlOpener) -> Result<ServiceHandle> {
    process::launch_and_open(game_spec(config), opener).await
}
