//! Configuration management for hangar.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "hangar";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `HANGAR_`)
/// 2. TOML config file at `~/.config/hangar/config.toml`
/// 3. Default values
///
/// The defaults reproduce the launcher's stock setup: dashboard on
/// `127.0.0.1:8501`, game server started with `node server.js` and reachable
/// at `http://localhost:3000`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dashboard presenter configuration.
    pub dashboard: DashboardConfig,
    /// Game server launch configuration.
    pub game: GameConfig,
    /// Bootstrap/runner configuration.
    pub bootstrap: BootstrapConfig,
}

/// Dashboard-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Address the dashboard listens on.
    pub host: String,
    /// Port the dashboard listens on.
    pub port: u16,
    /// How long the runner waits after starting the dashboard before
    /// opening the browser, in milliseconds.
    pub startup_wait_ms: u64,
    /// Whether the runner opens a browser tab at the dashboard URL.
    pub open_browser: bool,
}

/// Game-server launch configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Program used to start the game server.
    pub program: String,
    /// Entry file passed to the program.
    pub entry: String,
    /// Directory containing the game server.
    /// Defaults to the current directory.
    pub dir: Option<PathBuf>,
    /// URL the game server will eventually serve.
    pub url: String,
    /// How long to wait after spawning before opening the browser,
    /// in milliseconds.
    pub startup_wait_ms: u64,
}

/// Bootstrap/runner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Install missing game-server packages during preflight.
    pub auto_install: bool,
    /// Command the runner uses to start the dashboard presenter.
    /// Defaults to the current executable with `serve`.
    pub dashboard_command: Option<Vec<String>>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            startup_wait_ms: 3000,
            open_browser: true,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            program: "node".to_string(),
            entry: "server.js".to_string(),
            dir: None,
            url: "http://localhost:3000".to_string(),
            startup_wait_ms: 2000,
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            auto_install: true,
            dashboard_command: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `HANGAR_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("HANGAR_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.dashboard.port == 0 {
            return Err(Error::ConfigValidation {
                message: "dashboard.port must not be 0".to_string(),
            });
        }

        if self.dashboard.host.is_empty() {
            return Err(Error::ConfigValidation {
                message: "dashboard.host must not be empty".to_string(),
            });
        }

        if self.game.program.is_empty() {
            return Err(Error::ConfigValidation {
                message: "game.program must not be empty".to_string(),
            });
        }

        if self.game.entry.is_empty() {
            return Err(Error::ConfigValidation {
                message: "game.entry must not be empty".to_string(),
            });
        }

        if !self.game.url.starts_with("http://") && !self.game.url.starts_with("https://") {
            return Err(Error::ConfigValidation {
                message: format!("game.url must be an http(s) URL, got '{}'", self.game.url),
            });
        }

        if let Some(command) = &self.bootstrap.dashboard_command {
            if command.is_empty() {
                return Err(Error::ConfigValidation {
                    message: "bootstrap.dashboard_command must not be an empty list".to_string(),
                });
            }
        }

        Ok(())
    }

    /// The socket address string the dashboard binds to.
    #[must_use]
    pub fn dashboard_addr(&self) -> String {
        format!("{}:{}", self.dashboard.host, self.dashboard.port)
    }

    /// The URL the dashboard serves at, as opened in the browser.
    #[must_use]
    pub fn dashboard_url(&self) -> String {
        format!("http://{}:{}", self.dashboard.host, self.dashboard.port)
    }

    /// Directory containing the game server, resolving the default.
    #[must_use]
    pub fn game_dir(&self) -> PathBuf {
        self.game.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// How long to wait after spawning the game server.
    #[must_use]
    pub fn game_startup_wait(&self) -> Duration {
        Duration::from_millis(self.game.startup_wait_ms)
    }

    /// How long the runner waits after starting the dashboard.
    #[must_use]
    pub fn dashboard_startup_wait(&self) -> Duration {
        Duration::from_millis(self.dashboard.startup_wait_ms)
    }
}
