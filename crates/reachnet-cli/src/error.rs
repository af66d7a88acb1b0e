//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network file could not be loaded or saved
    #[error("Loader error: {0}")]
    Loader(#[from] reachnet_loader::LoaderError),

    /// Model lookup failure (unknown participant)
    #[error("{0}")]
    Model(#[from] reachnet_model::ModelError),

    /// Path engine failure or disagreement
    #[error("{0}")]
    Path(#[from] reachnet_paths::PathError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A simulation worker panicked or was cancelled
    #[error("Worker failed: {0}")]
    Worker(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
