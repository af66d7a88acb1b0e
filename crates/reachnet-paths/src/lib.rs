//! Reachnet Path Engines
//!
//! Single-source minimal paths over temporal hypergraphs.
//!
//! # Overview
//!
//! A path starts at a source vertex, uses one hyperedge after another, and may
//! only use a hyperedge whose timing is not earlier than the previous one (and
//! not earlier than the query's `min_timing` for the first hop). Three
//! distance types are supported:
//!
//! | Distance | Minimised quantity | Result value |
//! |----------|--------------------|--------------|
//! | **Shortest** | number of hyperedges used | [`Distance::Hops`] |
//! | **Fastest** | last timing minus first timing | [`Distance::Elapsed`] |
//! | **Foremost** | timing of the last hyperedge | [`Distance::Arrival`] |
//!
//! # Engines
//!
//! - [`single_source_dijkstra_vertices`]: label-setting search over vertices
//! - [`single_source_dijkstra_hyperedges`]: Dijkstra over hyperedges, projected onto members
//! - [`single_source_bellman_ford_hypergraph`]: iterated relaxation passes
//!
//! All engines return the same [`MinimalPaths`] mapping for the same query.
//! The source is never part of the mapping and unreachable vertices are
//! omitted. [`cross_validate`] runs all of them and checks that they agree.
//!
//! # Usage
//!
//! ```
//! use reachnet_model::{CommunicationNetwork, Distance, DistanceType};
//! use reachnet_paths::{single_source_minimal_paths, Algorithm};
//!
//! let network = CommunicationNetwork::new(
//!     [("h1", vec!["v1", "v2"]), ("h2", vec!["v2", "v3"]), ("h3", vec!["v3", "v4"])],
//!     [("h1", 1), ("h2", 2), ("h3", 3)],
//! )
//! .unwrap();
//!
//! let algorithm = Algorithm::recommended(&network);
//! let paths =
//!     single_source_minimal_paths(&network, &"v1", DistanceType::Fastest, 0, algorithm).unwrap();
//! assert_eq!(paths[&"v4"], Distance::<i32>::Elapsed(2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use reachnet_model::Distance;
use std::collections::BTreeMap;

/// Instantiate an engine body with the criterion matching a [`DistanceType`](reachnet_model::DistanceType)
macro_rules! with_criterion {
    ($distance:expr, $run:ident($($arg:expr),* $(,)?)) => {
        match $distance {
            reachnet_model::DistanceType::Shortest => {
                $run::<_, $crate::criterion::Shortest>($($arg),*)
            }
            reachnet_model::DistanceType::Fastest => {
                $run::<_, $crate::criterion::Fastest>($($arg),*)
            }
            reachnet_model::DistanceType::Foremost => {
                $run::<_, $crate::criterion::Foremost>($($arg),*)
            }
        }
    };
}

pub mod algorithm;
pub mod bellman_ford;
pub mod criterion;
pub mod error;
pub mod hyperedges;
mod index;
pub mod metrics;
pub mod vertices;

/// Result of a single-source query: reachable vertex to optimal distance
pub type MinimalPaths<V, T> = BTreeMap<V, Distance<T>>;

pub use algorithm::{
    cross_validate, single_source_minimal_paths, single_source_minimal_paths_with_metrics,
    Algorithm,
};
pub use bellman_ford::{
    single_source_bellman_ford_hypergraph, single_source_bellman_ford_hypergraph_with_metrics,
};
pub use error::PathError;
pub use hyperedges::{
    single_source_dijkstra_hyperedges, single_source_dijkstra_hyperedges_with_metrics,
};
pub use metrics::QueryMetrics;
pub use vertices::{single_source_dijkstra_vertices, single_source_dijkstra_vertices_with_metrics};
