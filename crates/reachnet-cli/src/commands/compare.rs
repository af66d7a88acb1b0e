//! Compare command implementation.

use crate::cli::CompareArgs;
use crate::commands::{open_network, resolve_min_timing};
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use reachnet_model::DistanceType;
use reachnet_paths::{cross_validate, PathError};

/// Execute the compare command.
///
/// Fails with the first disagreement after reporting it.
pub async fn execute_compare(args: CompareArgs, formatter: &Formatter) -> Result<()> {
    let network = open_network(&args.network)?;
    let min_timing = resolve_min_timing(&network, args.min_timing.as_deref())?;

    let distances: Vec<DistanceType> = match args.distance {
        Some(distance) => vec![distance.into()],
        None => DistanceType::ALL.to_vec(),
    };

    for distance in distances {
        match cross_validate(&network, &args.source, distance, min_timing) {
            Ok(paths) => {
                if formatter.format() != OutputFormat::Quiet {
                    println!(
                        "{}",
                        formatter.success(&format!(
                            "{}: all engines agree ({} participants reached)",
                            distance,
                            paths.len()
                        ))
                    );
                }
            }
            Err(err @ PathError::EngineDisagreement { .. }) => {
                println!("{}", formatter.error(&err.to_string()));
                return Err(CliError::Path(err));
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
