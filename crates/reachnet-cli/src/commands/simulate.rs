//! Simulate command implementation.

use crate::cli::SimulateArgs;
use crate::commands::{late_start_warning, open_network, resolve_min_timing};
use crate::config::{Config, SimulationConfig};
use crate::error::Result;
use crate::output::{simulation_json, Formatter};
use crate::simulation::{run_simulation, sample_sources, SimulationPlan};
use chrono::TimeDelta;
use reachnet_paths::Algorithm;
use std::collections::BTreeSet;
use std::fs;
use std::sync::Arc;

/// Merge command-line overrides into the configured simulation defaults.
pub fn effective_config(args: &SimulateArgs, config: &Config) -> Result<SimulationConfig> {
    let mut simulation: SimulationConfig = match args.preset {
        Some(preset) => preset.into(),
        None => config.simulation.clone(),
    };

    if args.all_sources {
        simulation.sources = None;
    } else if let Some(sources) = args.sources {
        simulation.sources = Some(sources);
    }
    if !args.distance.is_empty() {
        simulation.distance_types = args.distance.iter().map(|&d| d.into()).collect();
    }
    // Keep the first occurrence of each distance type, in the order given
    let mut seen = BTreeSet::new();
    simulation
        .distance_types
        .retain(|&distance| seen.insert(distance));
    if let Some(algorithm) = args.algorithm {
        simulation.algorithm = Some(algorithm.into());
    }
    if let Some(workers) = args.workers {
        simulation.workers = workers;
    }
    if args.cross_validate {
        simulation.cross_validate = true;
    }

    simulation.validate()?;
    Ok(simulation)
}

/// Execute the simulate command.
pub async fn execute_simulate(
    args: SimulateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let simulation = effective_config(&args, config)?;
    let network = open_network(&args.network)?;
    let min_timing = resolve_min_timing(&network, args.min_timing.as_deref())?;
    if let Some(warning) = late_start_warning(&network, min_timing, formatter) {
        eprintln!("{}", warning);
    }

    let plan = SimulationPlan {
        sources: sample_sources(&network, simulation.sources),
        distance_types: simulation.distance_types.clone(),
        algorithm: simulation
            .algorithm
            .unwrap_or_else(|| Algorithm::recommended(&network)),
        min_timing,
        workers: simulation.workers,
        cross_validate: simulation.cross_validate,
    };

    let report = run_simulation(Arc::new(network), plan).await?;

    if let Some(output) = &args.output {
        fs::write(output, serde_json::to_string_pretty(&simulation_json(&report))?)?;
        tracing::info!("Wrote simulation results to {}", output.display());
    }

    let bucket = TimeDelta::hours(simulation.bucket_hours as i64);
    println!(
        "{}",
        formatter.format_simulation(
            &report,
            &simulation.distance_types,
            bucket,
            simulation.buckets
        )?
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use reachnet_model::DistanceType;

    fn simulate_args(argv: &[&str]) -> SimulateArgs {
        let mut full = vec!["reachnet", "simulate", "net.json"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Simulate(args) => args,
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let config = Config::default();
        let simulation = effective_config(
            &simulate_args(&["-n", "7", "-d", "fastest", "-w", "3", "--cross-validate"]),
            &config,
        )
        .unwrap();
        assert_eq!(simulation.sources, Some(7));
        assert_eq!(simulation.distance_types, vec![DistanceType::Fastest]);
        assert_eq!(simulation.workers, 3);
        assert!(simulation.cross_validate);
    }

    #[test]
    fn test_repeated_distance_types_run_once() {
        let config = Config::default();
        let simulation = effective_config(
            &simulate_args(&["-d", "shortest", "-d", "fastest", "-d", "shortest"]),
            &config,
        )
        .unwrap();
        assert_eq!(
            simulation.distance_types,
            vec![DistanceType::Shortest, DistanceType::Fastest]
        );
    }

    #[test]
    fn test_preset_replaces_config() {
        let config = Config::default();
        let simulation =
            effective_config(&simulate_args(&["--preset", "exhaustive"]), &config).unwrap();
        assert_eq!(simulation.sources, None);
        assert!(simulation.cross_validate);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let config = Config::default();
        assert!(effective_config(&simulate_args(&["-w", "0"]), &config).is_err());
    }
}
