//! Preflight dependency checks for the game server.
//!
//! Before the runner starts anything it verifies that the external tools
//! (`node`, `npm`) are on PATH and that the game server's packages are
//! installed. Missing packages are installed with a pinned set first and an
//! unpinned set as the single fallback; if both fail, the error carries
//! manual-install instructions and the run aborts.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// External tools the launcher shells out to.
pub const REQUIRED_TOOLS: [&str; 2] = ["node", "npm"];

/// A game-server package the preflight checks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    /// Package name as it appears under `node_modules/`.
    pub name: &'static str,
    /// Pinned install spec (`name@version`).
    pub pinned: &'static str,
}

/// Packages the game server needs.
pub const REQUIRED_PACKAGES: [Package; 2] = [
    Package {
        name: "ws",
        pinned: "ws@8.18.0",
    },
    Package {
        name: "three",
        pinned: "three@0.164.1",
    },
];

/// Trait seam for running external commands during preflight.
///
/// Returns whether the command ran and exited successfully. Tests substitute
/// a scripted implementation to observe installer invocations.
pub trait ToolInvoker: std::fmt::Debug {
    /// Run `program` with `args` in `cwd`, reporting success.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures outside the child's control
    /// (spawning is not considered such a failure; a program that cannot be
    /// spawned reports `false`).
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<bool>;
}

/// Runs commands with [`std::process::Command`].
///
/// stdout is discarded (version probes are noisy); stderr stays visible so
/// installer failures reach the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInvoker;

impl ToolInvoker for SystemInvoker {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<bool> {
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) => Ok(status.success()),
            // A program that is not on PATH counts as an unsuccessful run,
            // not an invoker failure.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Preflight checker for the game directory.
#[derive(Debug)]
pub struct Preflight<'a> {
    game_dir: PathBuf,
    auto_install: bool,
    invoker: &'a dyn ToolInvoker,
}

impl<'a> Preflight<'a> {
    /// Create a preflight for the given game directory.
    #[must_use]
    pub fn new(game_dir: impl Into<PathBuf>, auto_install: bool, invoker: &'a dyn ToolInvoker) -> Self {
        Self {
            game_dir: game_dir.into(),
            auto_install,
            invoker,
        }
    }

    /// Verify every required tool answers `--version`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolMissing`] with install instructions for the
    /// first tool that does not respond.
    pub fn check_tools(&self) -> Result<()> {
        for tool in REQUIRED_TOOLS {
            debug!(%tool, "probing tool");
            if !self.invoker.run(tool, &["--version"], &self.game_dir)? {
                return Err(Error::tool_missing(
                    tool,
                    "Install Node.js (which provides node and npm) from https://nodejs.org and re-run.",
                ));
            }
        }
        Ok(())
    }

    /// Packages not present under the game directory's `node_modules/`.
    #[must_use]
    pub fn missing_packages(&self) -> Vec<Package> {
        REQUIRED_PACKAGES
            .iter()
            .copied()
            .filter(|pkg| !self.game_dir.join("node_modules").join(pkg.name).is_dir())
            .collect()
    }

    /// Run the full preflight: tools, then packages, installing if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a tool is missing, or if packages are missing and
    /// could not be installed (including the unpinned fallback attempt).
    pub fn ensure(&self) -> Result<()> {
        self.check_tools()?;

        let missing = self.missing_packages();
        if missing.is_empty() {
            debug!("all game-server packages present");
            return Ok(());
        }

        let names: Vec<&str> = missing.iter().map(|pkg| pkg.name).collect();
        info!(missing = ?names, "game-server packages missing");

        if !self.auto_install {
            return Err(Error::install(format!(
                "missing packages: {}. Run `npm install {}` in {} and re-run.",
                names.join(", "),
                names.join(" "),
                self.game_dir.display(),
            )));
        }

        self.install()
    }

    /// Install the fixed package set: pinned versions first, unpinned as the
    /// single fallback.
    fn install(&self) -> Result<()> {
        let pinned: Vec<&str> = REQUIRED_PACKAGES.iter().map(|pkg| pkg.pinned).collect();
        info!(packages = ?pinned, "installing game-server packages");
        if self.npm_install(&pinned)? {
            return Ok(());
        }

        let unpinned: Vec<&str> = REQUIRED_PACKAGES.iter().map(|pkg| pkg.name).collect();
        warn!(packages = ?unpinned, "pinned install failed, retrying unpinned");
        if self.npm_install(&unpinned)? {
            return Ok(());
        }

        Err(Error::install(format!(
            "both pinned and unpinned installs failed. Run `npm install {}` in {} manually, \
             then re-run.",
            unpinned.join(" "),
            self.game_dir.display(),
        )))
    }

    fn npm_install(&self, specs: &[&str]) -> Result<bool> {
        let mut args = vec!["install"];
        args.extend_from_slice(specs);
        self.invoker.run("npm", &args, &self.game_dir)
    }
}
