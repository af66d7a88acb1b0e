//! Command implementations.

pub mod compare;
pub mod config;
pub mod info;
pub mod paths;
pub mod simulate;

pub use self::compare::execute_compare;
pub use self::config::execute_config;
pub use self::info::execute_info;
pub use self::paths::execute_paths;
pub use self::simulate::execute_simulate;

use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::NaiveDateTime;
use reachnet_loader::{load_network, parse_timestamp, Network};
use std::path::Path;

/// Load a network file, reporting the path on failure.
pub(crate) fn open_network(path: &Path) -> Result<Network> {
    if !path.exists() {
        return Err(CliError::InvalidInput(format!(
            "Network file not found: {}",
            path.display()
        )));
    }
    Ok(load_network(path)?)
}

/// Parse `--min-timing`, defaulting to the network's earliest channel.
pub(crate) fn resolve_min_timing(network: &Network, arg: Option<&str>) -> Result<NaiveDateTime> {
    match arg {
        Some(text) => parse_timestamp("--min-timing", text)
            .map_err(|_| CliError::InvalidInput(format!("Invalid --min-timing: {}", text))),
        None => Ok(network
            .timing_range()
            .map(|(first, _)| first)
            .unwrap_or(NaiveDateTime::MIN)),
    }
}

/// Warning for a `min_timing` after the network's last channel, where every
/// query comes back empty.
pub(crate) fn late_start_warning(
    network: &Network,
    min_timing: NaiveDateTime,
    formatter: &Formatter,
) -> Option<String> {
    let (_, last) = network.timing_range()?;
    (min_timing > last).then(|| {
        formatter.warning(&format!(
            "--min-timing {} is after the last channel ({}), nothing is reachable",
            reachnet_loader::format_timestamp(&min_timing),
            reachnet_loader::format_timestamp(&last)
        ))
    })
}
