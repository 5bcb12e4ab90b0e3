//! `hangar` - Dashboard and launcher for an external flight simulator
//!
//! This library provides the pieces behind the `hangar` binary: a small web
//! dashboard with a launch button, the subprocess startup routine that
//! spawns the external game server and opens a browser tab at it, and the
//! preflight checks that keep the game server's dependencies installed.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod preflight;
pub mod process;
pub mod runner;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use process::{ServiceHandle, ServiceSpec, SystemOpener, UrlOpener};
