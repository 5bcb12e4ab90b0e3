//! Error types for hangar.
//!
//! This module defines all error types used throughout the hangar crate,
//! providing detailed context for debugging and user-friendly error messages.

use thiserror::Error;

/// The main error type for hangar operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Process Errors ===
    /// Spawning an external process failed.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// The program that could not be started.
        program: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Terminating a child process failed.
    #[error("failed to stop '{name}': {source}")]
    Terminate {
        /// Name of the service whose child could not be stopped.
        name: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Browser Errors ===
    /// Opening a URL in the system browser failed.
    #[error("failed to open {url} in the browser: {source}")]
    BrowserOpen {
        /// The URL that could not be opened.
        url: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Preflight Errors ===
    /// A required external tool is not available on PATH.
    #[error("required tool '{tool}' not found. {instructions}")]
    ToolMissing {
        /// Name of the missing tool.
        tool: String,
        /// Instructions for installing the tool.
        instructions: String,
    },

    /// Installing missing packages failed, including the fallback attempt.
    #[error("failed to install dependencies: {message}")]
    Install {
        /// Description of the failure, including manual-install instructions.
        message: String,
    },

    // === Dashboard Errors ===
    /// Failed to bind the dashboard listener.
    #[error("failed to bind dashboard to {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for hangar operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a spawn error for the given program.
    #[must_use]
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a browser-open error for the given URL.
    #[must_use]
    pub fn browser_open(url: impl Into<String>, source: std::io::Error) -> Self {
        Self::BrowserOpen {
            url: url.into(),
            source,
        }
    }

    /// Create a missing-tool error with install instructions.
    #[must_use]
    pub fn tool_missing(tool: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self::ToolMissing {
            tool: tool.into(),
            instructions: instructions.into(),
        }
    }

    /// Create an install failure error.
    #[must_use]
    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error came from a failed process spawn.
    #[must_use]
    pub fn is_spawn_error(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }

    /// Check if this error is a preflight issue (missing tool or failed install).
    #[must_use]
    pub fn is_preflight_error(&self) -> bool {
        matches!(self, Self::ToolMissing { .. } | Self::Install { .. })
    }
}
