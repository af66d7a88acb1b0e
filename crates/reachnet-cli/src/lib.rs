//! Reachnet CLI library.
//!
//! This library provides the core functionality for the `reachnet` command-line interface,
//! including configuration management, command execution, the simulation driver, and
//! output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod simulation;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
