//! Trait definitions for read-only hypergraph access
//!
//! These traits define the boundary between the model and the path engines.
//! Engines are written against [`TemporalHypergraph`] only.

use crate::Timing;
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Read-only view of a temporal hypergraph
///
/// Implemented by [`crate::CommunicationNetwork`]
pub trait TemporalHypergraph {
    /// Vertex identifier type
    type Vertex: Clone + Ord + Debug;

    /// Hyperedge identifier type
    type Hyperedge: Clone + Ord + Debug;

    /// Timing type of hyperedges
    type Timing: Timing;

    /// Whether the vertex belongs to at least one hyperedge
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// Number of distinct vertices
    fn vertex_count(&self) -> usize;

    /// Number of hyperedges
    fn hyperedge_count(&self) -> usize;

    /// Every hyperedge with its timing and member set, in identifier order
    fn hyperedge_entries(
        &self,
    ) -> impl Iterator<Item = (&Self::Hyperedge, Self::Timing, &BTreeSet<Self::Vertex>)> + '_;

    /// Whether any hyperedge is timed before the zero point of its timing type
    fn has_negative_timings(&self) -> bool {
        self.hyperedge_entries()
            .any(|(_, timing, _)| timing.is_negative())
    }
}
