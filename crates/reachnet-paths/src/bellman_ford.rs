//! Bellman-Ford style engine
//!
//! Repeated full passes over the hyperedges in identifier order. Each vertex
//! holds a Pareto bag of journeys; a pass boards every hyperedge with all
//! journeys that arrived in time and offers the extended journeys to every
//! member. The engine stops after the first pass that changes no bag. It
//! makes no assumption on the order in which hyperedges are visited, which
//! makes it the reference engine when timings are negative or the network
//! is not trusted.

use crate::criterion::{insert_pareto, Criterion, Journey};
use crate::index::HypergraphIndex;
use crate::{MinimalPaths, QueryMetrics};
use reachnet_model::{DistanceType, ModelError, TemporalHypergraph};

/// Single-source minimal paths by iterated relaxation
///
/// Supports all three distance types and returns the same mapping as the
/// Dijkstra engines.
///
/// # Errors
/// `EntityNotFound` if `source` is in no hyperedge.
pub fn single_source_bellman_ford_hypergraph<G: TemporalHypergraph>(
    graph: &G,
    source: &G::Vertex,
    distance: DistanceType,
    min_timing: G::Timing,
) -> Result<MinimalPaths<G::Vertex, G::Timing>, ModelError> {
    single_source_bellman_ford_hypergraph_with_metrics(graph, source, distance, min_timing)
        .map(|(paths, _)| paths)
}

/// Same as [`single_source_bellman_ford_hypergraph`], also returning work counters
pub fn single_source_bellman_ford_hypergraph_with_metrics<G: TemporalHypergraph>(
    graph: &G,
    source: &G::Vertex,
    distance: DistanceType,
    min_timing: G::Timing,
) -> Result<(MinimalPaths<G::Vertex, G::Timing>, QueryMetrics), ModelError> {
    let mut metrics = QueryMetrics::new();
    let paths = with_criterion!(distance, run(graph, source, min_timing, &mut metrics))?;
    metrics.reached = paths.len();

    tracing::debug!(
        "Bellman-Ford ({}) from {:?}: {} reached after {} rounds",
        distance,
        source,
        metrics.reached,
        metrics.rounds
    );

    Ok((paths, metrics))
}

fn run<G, C>(
    graph: &G,
    source: &G::Vertex,
    min_timing: G::Timing,
    metrics: &mut QueryMetrics,
) -> Result<MinimalPaths<G::Vertex, G::Timing>, ModelError>
where
    G: TemporalHypergraph,
    C: Criterion<G::Timing>,
{
    let index = HypergraphIndex::build(graph);
    let source_index = index.source(source)?;

    let mut bags: Vec<Vec<Journey<G::Timing>>> = vec![Vec::new(); index.vertex_count()];
    bags[source_index].push(Journey::origin(min_timing));

    // Every pass fixes at least one more hyperedge of each optimal path
    let max_rounds = index.hyperedge_count() + 1;
    let mut converged = false;

    for round in 1..=max_rounds {
        metrics.rounds = round;
        let mut changed = false;

        for hyperedge in index.hyperedges() {
            let mut boarding: Vec<Journey<G::Timing>> = Vec::new();
            for &member in &hyperedge.members {
                for journey in &bags[member] {
                    if let Some(next) = journey.extend(hyperedge.timing) {
                        metrics.relaxations += 1;
                        insert_pareto::<_, C>(&mut boarding, next);
                    }
                }
            }

            for &member in &hyperedge.members {
                for &next in &boarding {
                    if insert_pareto::<_, C>(&mut bags[member], next) {
                        metrics.labels_settled += 1;
                        changed = true;
                    } else {
                        metrics.labels_pruned += 1;
                    }
                }
            }
        }

        tracing::trace!("Bellman-Ford round {} changed: {}", round, changed);
        if !changed {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(
            "Bellman-Ford from {:?} still changing after {} rounds",
            source,
            max_rounds
        );
    }

    Ok(bags
        .iter()
        .enumerate()
        .filter(|(vertex, _)| *vertex != source_index)
        .filter_map(|(vertex, bag)| {
            bag.iter()
                .map(C::value)
                .min()
                .map(|value| (index.vertex_id(vertex).clone(), C::distance(value)))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reachnet_model::{CommunicationNetwork, Distance};
    use std::collections::BTreeMap;

    type Network = CommunicationNetwork<&'static str, &'static str, i64>;

    #[test]
    fn test_identifier_order_against_time_order() {
        // Hyperedges are visited z, y, x but fire x, y, z
        let network = Network::new(
            [("x", vec!["v1", "v2"]), ("y", vec!["v2", "v3"]), ("z", vec!["v3", "v4"])],
            [("x", 3), ("y", 2), ("z", 1)],
        )
        .unwrap();
        let paths =
            single_source_bellman_ford_hypergraph(&network, &"v4", DistanceType::Shortest, 0)
                .unwrap();
        assert_eq!(
            paths,
            BTreeMap::from([
                ("v1", Distance::Hops(3)),
                ("v2", Distance::Hops(2)),
                ("v3", Distance::Hops(1)),
            ])
        );
    }

    #[test]
    fn test_negative_timings() {
        let network = Network::new(
            [("h1", vec!["a", "b"]), ("h2", vec!["b", "c"])],
            [("h1", -5), ("h2", -3)],
        )
        .unwrap();

        let foremost =
            single_source_bellman_ford_hypergraph(&network, &"a", DistanceType::Foremost, -10)
                .unwrap();
        assert_eq!(
            foremost,
            BTreeMap::from([("b", Distance::Arrival(-5)), ("c", Distance::Arrival(-3))])
        );

        let fastest =
            single_source_bellman_ford_hypergraph(&network, &"a", DistanceType::Fastest, -10)
                .unwrap();
        assert_eq!(fastest[&"c"], Distance::Elapsed(2));
    }

    #[test]
    fn test_quiet_round_stops_early() {
        let network = Network::new(
            [("h1", vec!["v1", "v2"]), ("h2", vec!["v2", "v3"]), ("h3", vec!["v3", "v4"])],
            [("h1", 1), ("h2", 2), ("h3", 3)],
        )
        .unwrap();
        let (_, metrics) = single_source_bellman_ford_hypergraph_with_metrics(
            &network,
            &"v1",
            DistanceType::Foremost,
            0,
        )
        .unwrap();
        // Identifier order matches time order: one productive pass, one quiet
        assert_eq!(metrics.rounds, 2);
        assert_eq!(metrics.reached, 3);
    }
}
