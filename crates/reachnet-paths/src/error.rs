//! Error types for path queries

use reachnet_model::{DistanceType, ModelError};
use thiserror::Error;

/// Errors that can occur around path queries
///
/// The engines themselves only ever fail with [`ModelError`]; this type adds
/// the failures of the helpers built on top of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Model lookup failure, propagated unchanged
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Two engines returned different mappings for the same query
    #[error("Engines disagree on {distance} distances: {first} vs {second}")]
    EngineDisagreement {
        /// Distance type of the query
        distance: DistanceType,
        /// Name of the reference engine
        first: &'static str,
        /// Name of the engine that differed
        second: &'static str,
    },

    /// Unknown engine name
    #[error("Invalid algorithm: {0}")]
    InvalidAlgorithm(String),
}

impl PathError {
    /// True when the underlying failure is a missing vertex or hyperedge
    pub fn is_not_found(&self) -> bool {
        matches!(self, PathError::Model(err) if err.is_not_found())
    }
}
