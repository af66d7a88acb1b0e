//! Error types for model lookups and construction

use std::fmt;
use thiserror::Error;

/// Which identifier namespace a lookup searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A participant identifier
    Vertex,

    /// A communication event identifier
    Hyperedge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Vertex => write!(f, "vertex"),
            EntityKind::Hyperedge => write!(f, "hyperedge"),
        }
    }
}

/// Errors raised by the model and by queries against it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A vertex or hyperedge identifier is absent from the network
    #[error("Entity not found: {kind} {id}")]
    EntityNotFound {
        /// Namespace that was searched
        kind: EntityKind,
        /// Debug rendering of the missing identifier
        id: String,
    },

    /// Membership and timing mappings do not cover the same hyperedges
    #[error("Inconsistent timings: {0}")]
    InconsistentTimings(String),

    /// A distance type name outside the closed set
    #[error("Invalid distance type: {0}")]
    InvalidDistanceType(String),
}

impl ModelError {
    /// Build an `EntityNotFound` for a missing vertex
    pub fn vertex_not_found<V: fmt::Debug>(vertex: &V) -> Self {
        ModelError::EntityNotFound {
            kind: EntityKind::Vertex,
            id: format!("{:?}", vertex),
        }
    }

    /// Build an `EntityNotFound` for a missing hyperedge
    pub fn hyperedge_not_found<H: fmt::Debug>(hyperedge: &H) -> Self {
        ModelError::EntityNotFound {
            kind: EntityKind::Hyperedge,
            id: format!("{:?}", hyperedge),
        }
    }

    /// True for the `EntityNotFound` kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::EntityNotFound { .. })
    }
}
