//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::simulation::{reach_over_time, SimulationReport};
use chrono::{NaiveDateTime, TimeDelta};
use colored::*;
use reachnet_loader::{format_timestamp, Network};
use reachnet_model::{Distance, DistanceType};
use reachnet_paths::{Algorithm, MinimalPaths, QueryMetrics};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a network summary.
    pub fn format_info(&self, network: &Network) -> Result<String> {
        let range = network.timing_range();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "name": network.name(),
                "participants": network.vertex_count(),
                "channels": network.hyperedge_count(),
                "first": range.map(|(first, _)| format_timestamp(&first)),
                "last": range.map(|(_, last)| format_timestamp(&last)),
                "recommended_algorithm": Algorithm::recommended(network).as_str(),
            }))?),
            OutputFormat::Quiet => Ok(format!(
                "{} {}",
                network.vertex_count(),
                network.hyperedge_count()
            )),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Property", "Value"]);
                builder.push_record(["Name", network.name().unwrap_or("-")]);
                builder.push_record(["Participants", &network.vertex_count().to_string()]);
                builder.push_record(["Channels", &network.hyperedge_count().to_string()]);
                if let Some((first, last)) = range {
                    builder.push_record(["First channel", &format_timestamp(&first)]);
                    builder.push_record(["Last channel", &format_timestamp(&last)]);
                    builder.push_record(["Span", &format_elapsed(&(last - first))]);
                }
                builder.push_record(["Recommended engine", Algorithm::recommended(network).as_str()]);
                Ok(self.render(builder))
            }
        }
    }

    /// Format the result of one single-source query.
    pub fn format_paths(
        &self,
        source: &str,
        distance: DistanceType,
        paths: &MinimalPaths<String, NaiveDateTime>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "source": source,
                "distance": distance.as_str(),
                "paths": paths_json(paths),
            }))?),
            OutputFormat::Quiet => Ok(paths
                .iter()
                .map(|(target, d)| format!("{}\t{}", target, format_distance(d)))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if paths.is_empty() {
                    return Ok(self.colorize(
                        &format!("No participant reachable from {}.", source),
                        "yellow",
                    ));
                }
                let mut builder = Builder::default();
                builder.push_record(["Participant", distance_header(distance)]);
                for (target, d) in paths {
                    builder.push_record([target.as_str(), &format_distance(d)]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format work counters.
    pub fn format_metrics(&self, metrics: &QueryMetrics) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&metrics_json(metrics))?),
            OutputFormat::Quiet => Ok(String::new()),
            OutputFormat::Table => Ok(metrics.summary()),
        }
    }

    /// Format a simulation summary (per distance type).
    pub fn format_simulation(
        &self,
        report: &SimulationReport,
        distance_types: &[DistanceType],
        bucket: TimeDelta,
        buckets: usize,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&simulation_summary_json(
                report,
                distance_types,
                bucket,
                buckets,
            ))?),
            OutputFormat::Quiet => Ok(distance_types
                .iter()
                .map(|&d| format!("{}\t{:.2}", d, report.mean_reached(d)))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Distance", "Sources", "Mean reached", "Max reached"]);
                for &distance in distance_types {
                    let sources = report.results_for(distance).count();
                    let max_reached = report
                        .results_for(distance)
                        .map(|r| r.reached())
                        .max()
                        .unwrap_or(0);
                    builder.push_record([
                        distance.as_str(),
                        &sources.to_string(),
                        &format!("{:.2}", report.mean_reached(distance)),
                        &max_reached.to_string(),
                    ]);
                }
                let mut out = self.render(builder);
                out.push('\n');
                out.push_str(&self.info(&format!(
                    "{} queries with {} in {:.2?} ({} participants)",
                    report.results.len(),
                    report.algorithm,
                    report.elapsed,
                    report.participants
                )));
                Ok(out)
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn distance_header(distance: DistanceType) -> &'static str {
    match distance {
        DistanceType::Shortest => "Hops",
        DistanceType::Fastest => "Elapsed",
        DistanceType::Foremost => "Arrival",
    }
}

/// Human-readable distance value.
pub fn format_distance(distance: &Distance<NaiveDateTime>) -> String {
    match distance {
        Distance::Hops(hops) => hops.to_string(),
        Distance::Elapsed(elapsed) => format_elapsed(elapsed),
        Distance::Arrival(arrival) => format_timestamp(arrival),
    }
}

/// Render a span as `[Nd ]HH:MM:SS`.
pub fn format_elapsed(elapsed: &TimeDelta) -> String {
    let total = elapsed.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let (days, rest) = (total / 86_400, total % 86_400);
    let clock = format!("{:02}:{:02}:{:02}", rest / 3600, rest % 3600 / 60, rest % 60);
    if days > 0 {
        format!("{}{}d {}", sign, days, clock)
    } else {
        format!("{}{}", sign, clock)
    }
}

/// JSON value of a distance: hops as integer, elapsed as seconds, arrival as timestamp.
pub fn distance_json(distance: &Distance<NaiveDateTime>) -> Value {
    match distance {
        Distance::Hops(hops) => json!(hops),
        Distance::Elapsed(elapsed) => json!(elapsed.num_milliseconds() as f64 / 1000.0),
        Distance::Arrival(arrival) => json!(format_timestamp(arrival)),
    }
}

/// JSON object mapping targets to distances.
pub fn paths_json(paths: &MinimalPaths<String, NaiveDateTime>) -> Value {
    Value::Object(
        paths
            .iter()
            .map(|(target, d)| (target.clone(), distance_json(d)))
            .collect(),
    )
}

fn metrics_json(metrics: &QueryMetrics) -> Value {
    json!({
        "labels_settled": metrics.labels_settled,
        "labels_pruned": metrics.labels_pruned,
        "relaxations": metrics.relaxations,
        "rounds": metrics.rounds,
        "reached": metrics.reached,
    })
}

/// Full per-source results, as written by `simulate --output`.
pub fn simulation_json(report: &SimulationReport) -> Value {
    let results: Vec<Value> = report
        .results
        .iter()
        .map(|result| {
            json!({
                "source": result.source,
                "distance": result.distance_type.as_str(),
                "reached": result.reached(),
                "max": result.max_distance().as_ref().map(distance_json),
                "paths": paths_json(&result.paths),
            })
        })
        .collect();

    json!({
        "network": report.network,
        "algorithm": report.algorithm.as_str(),
        "participants": report.participants,
        "elapsed_seconds": report.elapsed.as_secs_f64(),
        "metrics": metrics_json(&report.metrics),
        "results": results,
    })
}

fn simulation_summary_json(
    report: &SimulationReport,
    distance_types: &[DistanceType],
    bucket: TimeDelta,
    buckets: usize,
) -> Value {
    let per_distance: serde_json::Map<String, Value> = distance_types
        .iter()
        .map(|&distance| {
            let reached: Vec<usize> = report.results_for(distance).map(|r| r.reached()).collect();
            (
                distance.as_str().to_string(),
                json!({
                    "sources": reached.len(),
                    "mean_reached": report.mean_reached(distance),
                    "max_reached": reached.iter().max().copied().unwrap_or(0),
                }),
            )
        })
        .collect();

    let mut summary = json!({
        "network": report.network,
        "algorithm": report.algorithm.as_str(),
        "participants": report.participants,
        "queries": report.results.len(),
        "elapsed_seconds": report.elapsed.as_secs_f64(),
        "distances": per_distance,
    });
    if distance_types.contains(&DistanceType::Fastest) {
        summary["reach_over_time"] = json!({
            "bucket_seconds": bucket.num_seconds(),
            "mean_reached": reach_over_time(report, bucket, buckets),
        });
    }
    summary
}
