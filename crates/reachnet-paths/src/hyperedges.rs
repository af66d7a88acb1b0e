//! Hyperedge relaxation engine
//!
//! Dijkstra over hyperedges. A path that ends with hyperedge `h` can only be
//! continued through hyperedges timed at or after `h`, so the continuation
//! depends on `h` alone and one scalar label per hyperedge is exact. Vertex
//! distances are recovered at the end by projecting every reached
//! hyperedge's label onto its members.

use crate::criterion::{Criterion, Journey};
use crate::index::HypergraphIndex;
use crate::{MinimalPaths, QueryMetrics};
use reachnet_model::{DistanceType, ModelError, TemporalHypergraph, Timing};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Single-source minimal paths, settling hyperedges
///
/// Produces exactly the same mapping as
/// [`single_source_dijkstra_vertices`](crate::single_source_dijkstra_vertices)
/// for every network, source, distance type and `min_timing`.
///
/// # Errors
/// `EntityNotFound` if `source` is in no hyperedge.
pub fn single_source_dijkstra_hyperedges<G: TemporalHypergraph>(
    graph: &G,
    source: &G::Vertex,
    distance: DistanceType,
    min_timing: G::Timing,
) -> Result<MinimalPaths<G::Vertex, G::Timing>, ModelError> {
    single_source_dijkstra_hyperedges_with_metrics(graph, source, distance, min_timing)
        .map(|(paths, _)| paths)
}

/// Same as [`single_source_dijkstra_hyperedges`], also returning work counters
pub fn single_source_dijkstra_hyperedges_with_metrics<G: TemporalHypergraph>(
    graph: &G,
    source: &G::Vertex,
    distance: DistanceType,
    min_timing: G::Timing,
) -> Result<(MinimalPaths<G::Vertex, G::Timing>, QueryMetrics), ModelError> {
    let mut metrics = QueryMetrics::new();
    let paths = with_criterion!(distance, run(graph, source, min_timing, &mut metrics))?;
    metrics.reached = paths.len();

    tracing::debug!(
        "Hyperedge relaxation ({}) from {:?}: {} reached, {} hyperedges settled",
        distance,
        source,
        metrics.reached,
        metrics.labels_settled
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
    let source = index.source(source)?;

    let mut labels: Vec<Option<Journey<G::Timing>>> = vec![None; index.hyperedge_count()];
    let mut settled = vec![false; index.hyperedge_count()];
    let mut queue: BinaryHeap<Reverse<(C::Value, usize)>> = BinaryHeap::new();

    let origin = Journey::origin(min_timing);
    for &h in index.admissible(source, min_timing) {
        if let Some(seed) = origin.extend(index.hyperedge(h).timing) {
            metrics.relaxations += 1;
            offer::<_, C>(&mut labels, &mut queue, h, seed);
        }
    }

    while let Some(Reverse((_, h))) = queue.pop() {
        if settled[h] {
            metrics.labels_pruned += 1;
            continue;
        }
        settled[h] = true;
        metrics.labels_settled += 1;

        let Some(journey) = labels[h] else {
            continue;
        };
        let hyperedge = index.hyperedge(h);
        for &transfer in &hyperedge.members {
            for &next in index.admissible(transfer, hyperedge.timing) {
                if settled[next] {
                    continue;
                }
                if let Some(candidate) = journey.extend(index.hyperedge(next).timing) {
                    metrics.relaxations += 1;
                    offer::<_, C>(&mut labels, &mut queue, next, candidate);
                }
            }
        }
    }

    // Projection onto members
    let mut best: Vec<Option<C::Value>> = vec![None; index.vertex_count()];
    for (h, label) in labels.iter().enumerate() {
        let Some(journey) = label else {
            continue;
        };
        let value = C::value(journey);
        for &member in &index.hyperedge(h).members {
            if member == source {
                continue;
            }
            best[member] = Some(match best[member] {
                Some(held) if held <= value => held,
                _ => value,
            });
        }
    }

    Ok(best
        .into_iter()
        .enumerate()
        .filter_map(|(vertex, value)| {
            value.map(|value| (index.vertex_id(vertex).clone(), C::distance(value)))
        })
        .collect())
}

/// Record `candidate` for hyperedge `h` if it strictly improves the label
fn offer<T, C>(
    labels: &mut [Option<Journey<T>>],
    queue: &mut BinaryHeap<Reverse<(C::Value, usize)>>,
    h: usize,
    candidate: Journey<T>,
) where
    T: Timing,
    C: Criterion<T>,
{
    let value = C::value(&candidate);
    let improves = match &labels[h] {
        None => true,
        Some(held) => value < C::value(held),
    };
    if improves {
        labels[h] = Some(candidate);
        queue.push(Reverse((value, h)));
    }
}
