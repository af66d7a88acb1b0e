//! Vertex relaxation engine
//!
//! Label-setting search whose unit of settlement is a journey arriving at a
//! vertex. A single scalar per vertex is not enough under temporal
//! constraints (the fewest-hop arrival may be too late to continue), so each
//! vertex keeps a bag of mutually non-dominated journeys. Journeys leave the
//! priority queue in `(value, arrival)` order, which makes the first journey
//! settled at a vertex the optimal one.
//!
//! Each hyperedge also remembers the journeys that already boarded it. A new
//! journey that would board with a dominated label is dropped before its
//! members are visited, the same "already boarded this trip" pruning used by
//! trip-based transit routing.

use crate::criterion::{insert_pareto, is_dominated, Criterion, Journey};
use crate::index::HypergraphIndex;
use crate::{MinimalPaths, QueryMetrics};
use reachnet_model::{DistanceType, ModelError, TemporalHypergraph};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// Queue entry: value, arrival, vertex, hops, departure
type Pending<C, T> = Reverse<(C, T, usize, usize, Option<T>)>;

/// Single-source minimal paths, settling vertices
///
/// Returns every vertex reachable from `source` by a valid temporal path
/// whose first hyperedge is not timed before `min_timing`, mapped to its
/// optimal distance. The source itself is never part of the result.
///
/// # Errors
/// `EntityNotFound` if `source` is in no hyperedge.
///
/// # Examples
///
/// ```
/// use reachnet_model::{CommunicationNetwork, Distance, DistanceType};
/// use reachnet_paths::single_source_dijkstra_vertices;
///
/// let network = CommunicationNetwork::new(
///     [("h1", vec!["v1", "v2"]), ("h2", vec!["v2", "v3"])],
///     [("h1", 1), ("h2", 2)],
/// )
/// .unwrap();
///
/// let paths = single_source_dijkstra_vertices(&network, &"v1", DistanceType::Shortest, 0).unwrap();
/// assert_eq!(paths[&"v3"], Distance::Hops(2));
/// ```
pub fn single_source_dijkstra_vertices<G: TemporalHypergraph>(
    graph: &G,
    source: &G::Vertex,
    distance: DistanceType,
    min_timing: G::Timing,
) -> Result<MinimalPaths<G::Vertex, G::Timing>, ModelError> {
    single_source_dijkstra_vertices_with_metrics(graph, source, distance, min_timing)
        .map(|(paths, _)| paths)
}

/// Same as [`single_source_dijkstra_vertices`], also returning work counters
pub fn single_source_dijkstra_vertices_with_metrics<G: TemporalHypergraph>(
    graph: &G,
    source: &G::Vertex,
    distance: DistanceType,
    min_timing: G::Timing,
) -> Result<(MinimalPaths<G::Vertex, G::Timing>, QueryMetrics), ModelError> {
    let mut metrics = QueryMetrics::new();
    let paths = with_criterion!(distance, run(graph, source, min_timing, &mut metrics))?;
    metrics.reached = paths.len();

    tracing::debug!(
        "Vertex relaxation ({}) from {:?}: {} reached, {} settled, {} pruned",
        distance,
        source,
        metrics.reached,
        metrics.labels_settled,
        metrics.labels_pruned
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

    let mut bags: Vec<Vec<Journey<G::Timing>>> = vec![Vec::new(); index.vertex_count()];
    let mut boarded: Vec<Vec<Journey<G::Timing>>> = vec![Vec::new(); index.hyperedge_count()];
    let mut queue: BinaryHeap<Pending<C::Value, G::Timing>> = BinaryHeap::new();
    let mut paths = BTreeMap::new();

    let origin = Journey::origin(min_timing);
    bags[source].push(origin);
    metrics.labels_settled += 1;
    relax::<G, C>(&index, source, &origin, &bags, &mut boarded, &mut queue, metrics);

    while let Some(Reverse((value, arrival, vertex, hops, departure))) = queue.pop() {
        let journey = Journey {
            hops,
            departure,
            arrival,
        };
        if is_dominated::<_, C>(&bags[vertex], &journey) {
            metrics.labels_pruned += 1;
            continue;
        }

        // First settlement is the optimum (source bag is never empty)
        if bags[vertex].is_empty() {
            paths.insert(index.vertex_id(vertex).clone(), C::distance(value));
        }
        bags[vertex].push(journey);
        metrics.labels_settled += 1;

        relax::<G, C>(&index, vertex, &journey, &bags, &mut boarded, &mut queue, metrics);
    }

    Ok(paths)
}

/// Board every admissible hyperedge at `vertex` and queue its members
fn relax<G, C>(
    index: &HypergraphIndex<'_, G>,
    vertex: usize,
    journey: &Journey<G::Timing>,
    bags: &[Vec<Journey<G::Timing>>],
    boarded: &mut [Vec<Journey<G::Timing>>],
    queue: &mut BinaryHeap<Pending<C::Value, G::Timing>>,
    metrics: &mut QueryMetrics,
) where
    G: TemporalHypergraph,
    C: Criterion<G::Timing>,
{
    for &h in index.admissible(vertex, journey.arrival) {
        let hyperedge = index.hyperedge(h);
        let Some(next) = journey.extend(hyperedge.timing) else {
            continue;
        };
        if !insert_pareto::<_, C>(&mut boarded[h], next) {
            metrics.labels_pruned += 1;
            continue;
        }

        let value = C::value(&next);
        for &member in &hyperedge.members {
            if member == vertex {
                continue;
            }
            metrics.relaxations += 1;
            if is_dominated::<_, C>(&bags[member], &next) {
                continue;
            }
            queue.push(Reverse((value, next.arrival, member, next.hops, next.departure)));
        }
    }
}
