//! Subprocess startup and supervision.
//!
//! Both the game-server launch and the runner's dashboard bootstrap follow
//! the same sequence: spawn the process, wait a fixed delay, open its URL in
//! the system browser. This module holds that routine once, parameterized by
//! a [`ServiceSpec`].
//!
//! There is deliberately no readiness probe: the fixed wait mirrors the
//! stock launcher, which opens the browser whether or not the child has
//! started listening.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Description of an external service to start: what to run, where, and
/// which URL it will eventually serve.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSpec {
    /// Human-readable service name, used in logs and errors.
    pub name: String,
    /// Program to execute.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory for the child, if any.
    pub cwd: Option<PathBuf>,
    /// URL the service serves once up.
    pub url: String,
    /// Fixed delay between spawning and opening the URL.
    pub startup_delay: Duration,
}

impl ServiceSpec {
    /// Create a spec with no arguments, no working directory, and no delay.
    #[must_use]
    pub fn new(name: impl Into<String>, program: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            url: url.into(),
            startup_delay: Duration::ZERO,
        }
    }

    /// Set the argument list.
    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the working directory.
    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Set the fixed startup delay.
    #[must_use]
    pub fn startup_delay(mut self, delay: Duration) -> Self {
        self.startup_delay = delay;
        self
    }
}

/// A spawned service child process.
///
/// The handle owns the child; [`ServiceHandle::shutdown`] consumes it, so the
/// child is terminated at most once.
#[derive(Debug)]
pub struct ServiceHandle {
    spec: ServiceSpec,
    child: Child,
}

impl ServiceHandle {
    /// The spec this handle was started from.
    #[must_use]
    pub fn spec(&self) -> &ServiceSpec {
        &self.spec
    }

    /// The URL this service serves.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.spec.url
    }

    /// OS process id of the child, if it is still attached.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Check whether the child is still running, without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the child's status could not be queried.
    pub fn is_running(&mut self) -> Result<bool> {
        Ok(self.child.try_wait()?.is_none())
    }

    /// Terminate the child process.
    ///
    /// Consumes the handle, so termination happens exactly once per launch.
    ///
    /// # Errors
    ///
    /// Returns an error if the kill signal could not be delivered.
    pub async fn shutdown(mut self) -> Result<()> {
        // If the child already exited on its own there is nothing to stop.
        if let Some(status) = self.child.try_wait()? {
            info!(service = %self.spec.name, %status, "child already exited");
            return Ok(());
        }

        info!(service = %self.spec.name, pid = ?self.child.id(), "stopping child process");
        self.child.kill().await.map_err(|source| Error::Terminate {
            name: self.spec.name.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Trait seam for opening a URL in the user's browser.
///
/// The production implementation is [`SystemOpener`]; tests substitute a
/// recording opener.
pub trait UrlOpener: Send + Sync + std::fmt::Debug {
    /// Open the given URL in the default browser.
    ///
    /// # Errors
    ///
    /// Returns an error if no browser could be launched.
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the operating system's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        debug!(%url, "opening in default browser");
        open::that(url).map_err(|source| Error::browser_open(url, source))
    }
}

/// Spawn the service described by `spec`.
///
/// The child inherits stdout/stderr so its output stays visible alongside
/// the launcher's own logs.
///
/// # Errors
///
/// Returns [`Error::Spawn`] naming the program if the spawn call fails.
pub fn start(spec: ServiceSpec) -> Result<ServiceHandle> {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = &spec.cwd {
        command.current_dir(dir);
    }

    info!(service = %spec.name, program = %spec.program, args = ?spec.args, "starting child process");
    let child = command
        .spawn()
        .map_err(|source| Error::spawn(spec.program.clone(), source))?;

    Ok(ServiceHandle { spec, child })
}

/// Run the full startup routine: spawn, wait the fixed delay, open the URL.
///
/// If the spawn fails, the opener is never invoked. If opening the browser
/// fails, the freshly spawned child is stopped before the error is returned.
///
/// # Errors
///
/// Returns an error if the spawn or the browser open fails.
pub async fn launch_and_open(spec: ServiceSpec, opener: &dyn UrlOpener) -> Result<ServiceHandle> {
    let handle = start(spec)?;

    debug!(
        service = %handle.spec.name,
        delay = ?handle.spec.startup_delay,
        "waiting for service startup"
    );
    tokio::time::sleep(handle.spec.startup_delay).await;

    let url = handle.spec.url.clone();
    if let Err(err) = opener.open(&url) {
        warn!(service = %handle.spec.name, %err, "browser open failed, stopping child");
        handle.shutdown().await?;
        return Err(err);
    }

    info!(service = %handle.spec.name, %url, "service launched");
    Ok(handle)
}


#[cfg(test)]
mod tests {
    use super::test_support::{FailingOpener, RecordingOpener};
    use super::*;

    fn sleeper(name: &str) -> ServiceSpec {
        ServiceSpec::new(name, "sh", "http://localhost:3000")
            .args(["-c", "sleep 30"])
    }

    #[test]
    fn test_spec_builder() {
        let spec = ServiceSpec::new("game-server", "node", "http://localhost:3000")
            .args(["server.js"])
            .cwd("/opt/sim")
            .startup_delay(Duration::from_millis(2000));

        assert_eq!(spec.name, "game-server");
        assert_eq!(spec.program, "node");
        assert_eq!(spec.args, vec!["server.js".to_string()]);
        assert_eq!(spec.cwd, Some(PathBuf::from("/opt/sim")));
        assert_eq!(spec.url, "http://localhost:3000");
        assert_eq!(spec.startup_delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_spec_defaults() {
        let spec = ServiceSpec::new("svc", "prog", "http://localhost:1");
        assert!(spec.args.is_empty());
        assert!(spec.cwd.is_none());
        assert_eq!(spec.startup_delay, Duration::ZERO);
    }

    #[test]
    fn test_start_unknown_program_is_spawn_error() {
        let spec = ServiceSpec::new("bogus", "hangar-test-no-such-program", "http://localhost:1");
        let err = start(spec).unwrap_err();
        assert!(err.is_spawn_error());
        assert!(err.to_string().contains("hangar-test-no-such-program"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_start_and_shutdown() {
        let mut handle = start(sleeper("sleepy")).unwrap();
        assert!(handle.is_running().unwrap());
        assert!(handle.id().is_some());
        handle.shutdown().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shutdown_after_child_exit() {
        let spec = ServiceSpec::new("quick", "sh", "http://localhost:1").args(["-c", "true"]);
        let mut handle = start(spec).unwrap();
        // Let the child finish before we stop it.
        let _ = handle.child.wait().await.unwrap();
        handle.shutdown().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_and_open_opens_expected_url() {
        let opener = RecordingOpener::default();
        let handle = launch_and_open(sleeper("game"), &opener).await.unwrap();

        assert_eq!(opener.opened(), vec!["http://localhost:3000".to_string()]);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_launch_and_open_spawn_failure_skips_browser() {
        let opener = RecordingOpener::default();
        let spec = ServiceSpec::new("bogus", "hangar-test-no-such-program", "http://localhost:1");

        let err = launch_and_open(spec, &opener).await.unwrap_err();
        assert!(err.is_spawn_error());
        assert!(opener.opened().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_and_open_browser_failure_stops_child() {
        let opener = FailingOpener;
        let err = launch_and_open(sleeper("game"), &opener).await.unwrap_err();
        assert!(matches!(err, Error::BrowserOpen { .. }));
    }
}
