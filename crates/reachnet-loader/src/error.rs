//! Error types for reading and writing network files

use reachnet_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading or saving a network
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File content is not a valid network document
    #[error("Invalid network JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A channel's `end` field is not a recognised timestamp
    #[error("Invalid timestamp for channel {channel}: {value:?}")]
    Timestamp {
        /// Channel carrying the bad value
        channel: String,
        /// The rejected text
        value: String,
    },

    /// Compression format that this loader cannot read
    #[error("Unsupported compression: {0}")]
    UnsupportedCompression(String),

    /// Network construction failed
    #[error(transparent)]
    Model(#[from] ModelError),
}
