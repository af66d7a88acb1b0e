//! Paths command implementation.

use crate::cli::PathsArgs;
use crate::commands::{late_start_warning, open_network, resolve_min_timing};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use reachnet_model::DistanceType;
use reachnet_paths::{single_source_minimal_paths_with_metrics, Algorithm};

/// Execute the paths command.
pub async fn execute_paths(args: PathsArgs, formatter: &Formatter) -> Result<()> {
    let network = open_network(&args.network)?;
    if !network.contains_vertex(&args.source) {
        return Err(CliError::InvalidInput(format!(
            "Unknown participant '{}'",
            args.source
        )));
    }

    let distance: DistanceType = args.distance.into();
    let min_timing = resolve_min_timing(&network, args.min_timing.as_deref())?;
    if let Some(warning) = late_start_warning(&network, min_timing, formatter) {
        eprintln!("{}", warning);
    }
    let algorithm = args
        .algorithm
        .map(Algorithm::from)
        .unwrap_or_else(|| Algorithm::recommended(&network));

    let (paths, metrics) = single_source_minimal_paths_with_metrics(
        &network,
        &args.source,
        distance,
        min_timing,
        algorithm,
    )?;

    println!("{}", formatter.format_paths(&args.source, distance, &paths)?);
    if args.metrics {
        println!("{}", formatter.format_metrics(&metrics)?);
    }

    Ok(())
}
