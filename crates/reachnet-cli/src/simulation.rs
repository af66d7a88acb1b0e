//! Simulation driver: many single-source queries over one network
//!
//! Sources are split into contiguous chunks, one per worker. Each worker is a
//! blocking task that shares the network through an `Arc` and runs every
//! requested distance type for its sources. Results come back in source
//! order regardless of which worker finishes first.

use crate::error::{CliError, Result};
use chrono::{NaiveDateTime, TimeDelta};
use reachnet_loader::Network;
use reachnet_model::{Distance, DistanceType};
use reachnet_paths::{
    cross_validate, single_source_minimal_paths_with_metrics, Algorithm, MinimalPaths,
    QueryMetrics,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Everything a simulation run needs besides the network
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    /// Source participants, in result order
    pub sources: Vec<String>,
    /// Distance types computed per source
    pub distance_types: Vec<DistanceType>,
    /// Engine used for every query
    pub algorithm: Algorithm,
    /// Lower bound on the first channel of every path
    pub min_timing: NaiveDateTime,
    /// Number of blocking worker tasks
    pub workers: usize,
    /// Run all engines per query and fail on disagreement
    pub cross_validate: bool,
}

/// Minimal paths from one source for one distance type
#[derive(Debug, Clone)]
pub struct SourceResult {
    /// The source participant
    pub source: String,
    /// Distance type of the query
    pub distance_type: DistanceType,
    /// Reached participants and their distances
    pub paths: MinimalPaths<String, NaiveDateTime>,
}

impl SourceResult {
    /// Number of participants reached
    pub fn reached(&self) -> usize {
        self.paths.len()
    }

    /// The largest distance among reached participants
    pub fn max_distance(&self) -> Option<Distance<NaiveDateTime>> {
        self.paths.values().copied().reduce(|a, b| match (a, b) {
            (Distance::Hops(x), Distance::Hops(y)) => Distance::Hops(x.max(y)),
            (Distance::Elapsed(x), Distance::Elapsed(y)) => Distance::Elapsed(x.max(y)),
            (Distance::Arrival(x), Distance::Arrival(y)) => Distance::Arrival(x.max(y)),
            (a, _) => a,
        })
    }
}

/// Outcome of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Network name, when known
    pub network: Option<String>,
    /// Engine used
    pub algorithm: Algorithm,
    /// Number of participants in the network
    pub participants: usize,
    /// One entry per source and distance type, in plan order
    pub results: Vec<SourceResult>,
    /// Work counters summed over all queries
    pub metrics: QueryMetrics,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl SimulationReport {
    /// Results of one distance type
    pub fn results_for(&self, distance: DistanceType) -> impl Iterator<Item = &SourceResult> {
        self.results
            .iter()
            .filter(move |result| result.distance_type == distance)
    }

    /// Mean number of participants reached per source
    pub fn mean_reached(&self, distance: DistanceType) -> f64 {
        let (count, total) = self
            .results_for(distance)
            .fold((0usize, 0usize), |(count, total), result| {
                (count + 1, total + result.reached())
            });
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }
}

/// Pick `limit` sources spread evenly over the sorted participants
///
/// Deterministic: the same network and limit always give the same sample.
/// `None` or a limit at least the participant count selects everyone.
pub fn sample_sources(network: &Network, limit: Option<usize>) -> Vec<String> {
    let participants: Vec<&String> = network.participants().into_iter().collect();
    let total = participants.len();
    let limit = limit.unwrap_or(total).min(total);
    if limit == 0 {
        return Vec::new();
    }

    (0..limit)
        .map(|i| participants[i * total / limit].clone())
        .collect()
}

/// Run the plan on a pool of blocking workers
pub async fn run_simulation(network: Arc<Network>, plan: SimulationPlan) -> Result<SimulationReport> {
    if plan.workers == 0 {
        return Err(CliError::InvalidInput("workers must be at least 1".into()));
    }

    let started = Instant::now();
    let chunk_size = plan.sources.len().div_ceil(plan.workers).max(1);
    tracing::info!(
        "Simulating {} sources x {} distance types with {} ({} workers)",
        plan.sources.len(),
        plan.distance_types.len(),
        plan.algorithm,
        plan.workers
    );

    let mut handles = Vec::new();
    for (index, chunk) in plan.sources.chunks(chunk_size).enumerate() {
        let network = Arc::clone(&network);
        let sources = chunk.to_vec();
        let plan = plan.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            tracing::debug!("Worker {} starting with {} sources", index, sources.len());
            run_chunk(&network, &sources, &plan)
        }));
    }

    let mut results = Vec::with_capacity(plan.sources.len() * plan.distance_types.len());
    let mut metrics = QueryMetrics::new();
    for handle in handles {
        let (chunk_results, chunk_metrics) = handle
            .await
            .map_err(|e| CliError::Worker(format!("Task join error: {}", e)))??;
        results.extend(chunk_results);
        metrics.absorb(&chunk_metrics);
    }

    let elapsed = started.elapsed();
    tracing::info!(
        "Simulation finished in {:.2?}: {} queries, {} labels settled",
        elapsed,
        results.len(),
        metrics.labels_settled
    );

    Ok(SimulationReport {
        network: network.name().map(str::to_string),
        algorithm: plan.algorithm,
        participants: network.vertex_count(),
        results,
        metrics,
        elapsed,
    })
}

fn run_chunk(
    network: &Network,
    sources: &[String],
    plan: &SimulationPlan,
) -> Result<(Vec<SourceResult>, QueryMetrics)> {
    let mut results = Vec::with_capacity(sources.len() * plan.distance_types.len());
    let mut metrics = QueryMetrics::new();

    for source in sources {
        for &distance_type in &plan.distance_types {
            let paths = if plan.cross_validate {
                cross_validate(network, source, distance_type, plan.min_timing)?
            } else {
                let (paths, query_metrics) = single_source_minimal_paths_with_metrics(
                    network,
                    source,
                    distance_type,
                    plan.min_timing,
                    plan.algorithm,
                )?;
                metrics.absorb(&query_metrics);
                paths
            };
            results.push(SourceResult {
                source: source.clone(),
                distance_type,
                paths,
            });
        }
    }

    Ok((results, metrics))
}

/// Cumulative reach over elapsed time, averaged over sources
///
/// Entry `k` is the mean number of participants a source reaches with a
/// FASTEST distance below `(k + 1) * bucket`, so everything reached within
/// the first bucket already counts at entry 0. Sources without FASTEST
/// results are ignored; the curve is all zeros when there are none.
pub fn reach_over_time(report: &SimulationReport, bucket: TimeDelta, buckets: usize) -> Vec<f64> {
    let mut curve = vec![0.0; buckets + 1];
    let mut sources = 0usize;

    for result in report.results_for(DistanceType::Fastest) {
        sources += 1;
        for distance in result.paths.values() {
            let Some(elapsed) = distance.elapsed() else {
                continue;
            };
            let first = bucket_of(elapsed, bucket);
            for slot in curve.iter_mut().skip(first) {
                *slot += 1.0;
            }
        }
    }

    if sources > 0 {
        for slot in &mut curve {
            *slot /= sources as f64;
        }
    }
    curve
}

/// Index of the bucket containing `elapsed`, bucket `k` covering
/// `[k * bucket, (k + 1) * bucket)`
fn bucket_of(elapsed: TimeDelta, bucket: TimeDelta) -> usize {
    let bucket_ms = bucket.num_milliseconds().max(1);
    let elapsed_ms = elapsed.num_milliseconds().max(0);
    (elapsed_ms / bucket_ms) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use reachnet_loader::parse_network;

    fn network() -> Network {
        parse_network(
            r#"{
                "c1": {"participants": ["a", "b"], "end": "2020-02-01T00:00:00"},
                "c2": {"participants": ["b", "c"], "end": "2020-02-02T12:00:00"},
                "c3": {"participants": ["c", "d"], "end": "2020-02-04T00:00:00"},
                "c4": {"participants": ["x", "y"], "end": "2020-02-01T00:00:00"}
            }"#,
            Some("test".to_string()),
        )
        .unwrap()
    }

    fn plan(network: &Network, distance_types: Vec<DistanceType>, workers: usize) -> SimulationPlan {
        SimulationPlan {
            sources: sample_sources(network, None),
            distance_types,
            algorithm: Algorithm::recommended(network),
            min_timing: network.timing_range().unwrap().0,
            workers,
            cross_validate: false,
        }
    }

    #[test]
    fn test_sample_sources_is_spread_and_stable() {
        let network = network();
        assert_eq!(sample_sources(&network, None).len(), 6);
        assert_eq!(sample_sources(&network, Some(100)).len(), 6);
        assert_eq!(sample_sources(&network, Some(3)), vec!["a", "c", "x"]);
        assert_eq!(sample_sources(&network, Some(3)), sample_sources(&network, Some(3)));
        assert!(sample_sources(&network, Some(0)).is_empty());
    }

    #[tokio::test]
    async fn test_results_in_source_order_for_any_worker_count() {
        let network = Arc::new(network());
        let single = run_simulation(
            Arc::clone(&network),
            plan(&network, vec![DistanceType::Shortest], 1),
        )
        .await
        .unwrap();
        let pooled = run_simulation(
            Arc::clone(&network),
            plan(&network, vec![DistanceType::Shortest], 4),
        )
        .await
        .unwrap();

        let order = |report: &SimulationReport| -> Vec<String> {
            report.results.iter().map(|r| r.source.clone()).collect()
        };
        assert_eq!(order(&single), order(&pooled));
        assert_eq!(single.results[0].paths, pooled.results[0].paths);
        assert_eq!(single.network.as_deref(), Some("test"));
        assert_eq!(single.participants, 6);
    }

    #[tokio::test]
    async fn test_reach_summary() {
        let network = Arc::new(network());
        let report = run_simulation(
            Arc::clone(&network),
            plan(&network, DistanceType::ALL.to_vec(), 2),
        )
        .await
        .unwrap();
        assert_eq!(report.results.len(), 18);

        let from_a = report
            .results_for(DistanceType::Shortest)
            .find(|r| r.source == "a")
            .unwrap();
        assert_eq!(from_a.reached(), 3);
        assert_eq!(from_a.max_distance(), Some(Distance::Hops(3)));

        // a reaches b at once, c after 1.5 days, d after 3 days
        let curve = reach_over_time(&report, TimeDelta::days(1), 4);
        let from_a_curve: Vec<usize> = {
            let single = SimulationReport {
                results: report
                    .results_for(DistanceType::Fastest)
                    .filter(|r| r.source == "a")
                    .cloned()
                    .collect(),
                ..report.clone()
            };
            reach_over_time(&single, TimeDelta::days(1), 4)
                .into_iter()
                .map(|v| v as usize)
                .collect()
        };
        assert_eq!(from_a_curve, vec![1, 2, 2, 3, 3]);
        assert_eq!(curve.len(), 5);
        assert!(curve.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_unknown_source_fails_the_run() {
        let network = Arc::new(network());
        let mut plan = plan(&network, vec![DistanceType::Foremost], 2);
        plan.sources.push("nobody".to_string());
        let err = run_simulation(network, plan).await.unwrap_err();
        assert!(matches!(err, CliError::Model(_)));
    }

    #[test]
    fn test_bucket_of() {
        let day = TimeDelta::days(1);
        assert_eq!(bucket_of(TimeDelta::zero(), day), 0);
        assert_eq!(bucket_of(TimeDelta::hours(1), day), 0);
        assert_eq!(bucket_of(TimeDelta::hours(23), day), 0);
        assert_eq!(bucket_of(TimeDelta::hours(25), day), 1);
        assert_eq!(bucket_of(TimeDelta::days(2), day), 2);
    }
}
