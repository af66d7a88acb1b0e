//! Dense per-query index over a temporal hypergraph
//!
//! Engines translate identifiers to contiguous indices once per query so
//! that labels live in plain vectors owned by that query.

use reachnet_model::{ModelError, TemporalHypergraph};
use std::collections::BTreeMap;

/// One hyperedge in index space
pub(crate) struct IndexedHyperedge<'g, G: TemporalHypergraph> {
    pub id: &'g G::Hyperedge,
    pub timing: G::Timing,
    pub members: Vec<usize>,
}

/// Index-space view of a hypergraph
///
/// Vertex indices follow identifier order. Each vertex's incident hyperedges
/// are sorted by timing so the admissible ones form a suffix.
pub(crate) struct HypergraphIndex<'g, G: TemporalHypergraph> {
    vertices: Vec<&'g G::Vertex>,
    lookup: BTreeMap<&'g G::Vertex, usize>,
    hyperedges: Vec<IndexedHyperedge<'g, G>>,
    incidence: Vec<Vec<usize>>,
}

impl<'g, G: TemporalHypergraph> HypergraphIndex<'g, G> {
    /// Build the index for one query
    pub fn build(graph: &'g G) -> Self {
        let mut lookup: BTreeMap<&'g G::Vertex, usize> = BTreeMap::new();
        for (_, _, members) in graph.hyperedge_entries() {
            for vertex in members {
                lookup.entry(vertex).or_insert(0);
            }
        }
        let vertices: Vec<&'g G::Vertex> = lookup.keys().copied().collect();
        for (index, slot) in lookup.values_mut().enumerate() {
            *slot = index;
        }

        let mut incidence = vec![Vec::new(); vertices.len()];
        let mut hyperedges = Vec::with_capacity(graph.hyperedge_count());
        for (position, (id, timing, members)) in graph.hyperedge_entries().enumerate() {
            let members: Vec<usize> = members.iter().map(|v| lookup[v]).collect();
            for &member in &members {
                incidence[member].push(position);
            }
            hyperedges.push(IndexedHyperedge {
                id,
                timing,
                members,
            });
        }

        for incident in &mut incidence {
            incident.sort_by_key(|&h| (hyperedges[h].timing, h));
        }

        Self {
            vertices,
            lookup,
            hyperedges,
            incidence,
        }
    }

    /// Index of the query source
    ///
    /// # Errors
    /// `EntityNotFound` if the vertex is in no hyperedge (always the case
    /// for an empty network).
    pub fn source(&self, vertex: &G::Vertex) -> Result<usize, ModelError> {
        self.lookup
            .get(vertex)
            .copied()
            .ok_or_else(|| ModelError::vertex_not_found(vertex))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn hyperedge_count(&self) -> usize {
        self.hyperedges.len()
    }

    pub fn vertex_id(&self, vertex: usize) -> &'g G::Vertex {
        self.vertices[vertex]
    }

    pub fn hyperedge(&self, hyperedge: usize) -> &IndexedHyperedge<'g, G> {
        &self.hyperedges[hyperedge]
    }

    pub fn hyperedges(&self) -> &[IndexedHyperedge<'g, G>] {
        &self.hyperedges
    }

    /// Hyperedges at `vertex` whose timing is not before `not_before`
    pub fn admissible(&self, vertex: usize, not_before: G::Timing) -> &[usize] {
        let incident = &self.incidence[vertex];
        let start = incident.partition_point(|&h| self.hyperedges[h].timing < not_before);
        &incident[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reachnet_model::CommunicationNetwork;

    fn network() -> CommunicationNetwork<&'static str, &'static str, i64> {
        CommunicationNetwork::new(
            [("a", vec!["v2", "v1"]), ("b", vec!["v2", "v3"]), ("c", vec!["v2"])],
            [("a", 7), ("b", 2), ("c", 5)],
        )
        .unwrap()
    }

    #[test]
    fn test_vertices_follow_identifier_order() {
        let network = network();
        let index = HypergraphIndex::build(&network);
        assert_eq!(index.vertex_count(), 3);
        assert_eq!(index.hyperedge_count(), 3);
        assert_eq!(*index.vertex_id(0), "v1");
        assert_eq!(index.source(&"v3").unwrap(), 2);
    }

    #[test]
    fn test_admissible_suffix_sorted_by_timing() {
        let network = network();
        let index = HypergraphIndex::build(&network);
        let v2 = index.source(&"v2").unwrap();

        let timings: Vec<i64> = index
            .admissible(v2, i64::MIN)
            .iter()
            .map(|&h| index.hyperedge(h).timing)
            .collect();
        assert_eq!(timings, vec![2, 5, 7]);

        let later: Vec<&str> = index
            .admissible(v2, 5)
            .iter()
            .map(|&h| *index.hyperedge(h).id)
            .collect();
        assert_eq!(later, vec!["c", "a"]);
        assert!(index.admissible(v2, 8).is_empty());
    }

    #[test]
    fn test_unknown_source() {
        let network = network();
        let index = HypergraphIndex::build(&network);
        assert!(index.source(&"v9").unwrap_err().is_not_found());
    }
}
