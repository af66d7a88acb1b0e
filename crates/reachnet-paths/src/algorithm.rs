//! Engine selection and cross-checking

use crate::{
    single_source_bellman_ford_hypergraph_with_metrics,
    single_source_dijkstra_hyperedges_with_metrics, single_source_dijkstra_vertices_with_metrics,
    MinimalPaths, PathError, QueryMetrics,
};
use reachnet_model::{DistanceType, ModelError, TemporalHypergraph};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The available minimal-path engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    /// Label-setting search over vertices
    DijkstraVertices,
    /// Dijkstra over hyperedges with projection onto members
    DijkstraHyperedges,
    /// Iterated full relaxation passes
    BellmanFord,
}

impl Algorithm {
    /// Every engine, in a stable order
    pub const ALL: [Algorithm; 3] = [
        Algorithm::DijkstraVertices,
        Algorithm::DijkstraHyperedges,
        Algorithm::BellmanFord,
    ];

    /// Stable name used on the command line and in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::DijkstraVertices => "dijkstra-vertices",
            Algorithm::DijkstraHyperedges => "dijkstra-hyperedges",
            Algorithm::BellmanFord => "bellman-ford",
        }
    }

    /// Pick an engine for a network
    ///
    /// All engines are exact; Bellman-Ford is preferred when timings are
    /// negative, the hyperedge engine otherwise since it does the least work.
    pub fn recommended<G: TemporalHypergraph>(graph: &G) -> Self {
        if graph.has_negative_timings() {
            Algorithm::BellmanFord
        } else {
            Algorithm::DijkstraHyperedges
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "dijkstra-vertices" | "vertices" => Ok(Algorithm::DijkstraVertices),
            "dijkstra-hyperedges" | "hyperedges" => Ok(Algorithm::DijkstraHyperedges),
            "bellman-ford" | "bellman-ford-hypergraph" => Ok(Algorithm::BellmanFord),
            _ => Err(PathError::InvalidAlgorithm(s.to_string())),
        }
    }
}

/// Run one query with the chosen engine
///
/// # Errors
/// `EntityNotFound` if `source` is in no hyperedge.
pub fn single_source_minimal_paths<G: TemporalHypergraph>(
    graph: &G,
    source: &G::Vertex,
    distance: DistanceType,
    min_timing: G::Timing,
    algorithm: Algorithm,
) -> Result<MinimalPaths<G::Vertex, G::Timing>, ModelError> {
    single_source_minimal_paths_with_metrics(graph, source, distance, min_timing, algorithm)
        .map(|(paths, _)| paths)
}

/// Same as [`single_source_minimal_paths`], also returning work counters
pub fn single_source_minimal_paths_with_metrics<G: TemporalHypergraph>(
    graph: &G,
    source: &G::Vertex,
    distance: DistanceType,
    min_timing: G::Timing,
    algorithm: Algorithm,
) -> Result<(MinimalPaths<G::Vertex, G::Timing>, QueryMetrics), ModelError> {
    match algorithm {
        Algorithm::DijkstraVertices => {
            single_source_dijkstra_vertices_with_metrics(graph, source, distance, min_timing)
        }
        Algorithm::DijkstraHyperedges => {
            single_source_dijkstra_hyperedges_with_metrics(graph, source, distance, min_timing)
        }
        Algorithm::BellmanFord => {
            single_source_bellman_ford_hypergraph_with_metrics(graph, source, distance, min_timing)
        }
    }
}

/// Run the query with every engine and require identical results
///
/// Returns the common mapping.
///
/// # Errors
/// - `PathError::Model` if the source is unknown
/// - `PathError::EngineDisagreement` naming the first engine that differs
pub fn cross_validate<G: TemporalHypergraph>(
    graph: &G,
    source: &G::Vertex,
    distance: DistanceType,
    min_timing: G::Timing,
) -> Result<MinimalPaths<G::Vertex, G::Timing>, PathError> {
    let [reference_engine, others @ ..] = Algorithm::ALL;
    let reference =
        single_source_minimal_paths(graph, source, distance, min_timing, reference_engine)?;

    for engine in others {
        let paths = single_source_minimal_paths(graph, source, distance, min_timing, engine)?;
        if paths != reference {
            tracing::error!(
                "{} and {} disagree from {:?} ({})",
                reference_engine,
                engine,
                source,
                distance
            );
            return Err(PathError::EngineDisagreement {
                distance,
                first: reference_engine.as_str(),
                second: engine.as_str(),
            });
        }
    }

    Ok(reference)
}
