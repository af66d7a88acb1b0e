//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use reachnet_model::DistanceType;
use reachnet_paths::Algorithm;
use std::path::PathBuf;

/// Reachnet - minimal temporal paths in communication networks.
#[derive(Debug, Parser)]
#[command(name = "reachnet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "REACHNET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (identifiers and values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarise a network file
    Info(InfoArgs),

    /// Minimal paths from one participant
    Paths(PathsArgs),

    /// Run every engine on one query and check they agree
    Compare(CompareArgs),

    /// Minimal paths from many participants
    Simulate(SimulateArgs),

    /// Show or initialise the configuration
    Config(ConfigArgs),
}

/// Arguments for the info command.
#[derive(Debug, Parser)]
pub struct InfoArgs {
    /// Network file (.json, .json.gz or .json.bz2)
    pub network: PathBuf,
}

/// Arguments for the paths command.
#[derive(Debug, Parser)]
pub struct PathsArgs {
    /// Network file (.json, .json.gz or .json.bz2)
    pub network: PathBuf,

    /// Source participant
    #[arg(short, long)]
    pub source: String,

    /// Distance type
    #[arg(short, long, value_enum, default_value = "foremost")]
    pub distance: DistanceArg,

    /// Ignore channels before this timestamp (default: earliest channel)
    #[arg(short, long)]
    pub min_timing: Option<String>,

    /// Engine (default: chosen from the network)
    #[arg(short, long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Print work counters after the result
    #[arg(long)]
    pub metrics: bool,
}

/// Arguments for the compare command.
#[derive(Debug, Parser)]
pub struct CompareArgs {
    /// Network file (.json, .json.gz or .json.bz2)
    pub network: PathBuf,

    /// Source participant
    #[arg(short, long)]
    pub source: String,

    /// Distance type (default: all)
    #[arg(short, long, value_enum)]
    pub distance: Option<DistanceArg>,

    /// Ignore channels before this timestamp (default: earliest channel)
    #[arg(short, long)]
    pub min_timing: Option<String>,
}

/// Arguments for the simulate command.
#[derive(Debug, Parser)]
pub struct SimulateArgs {
    /// Network file (.json, .json.gz or .json.bz2)
    pub network: PathBuf,

    /// Configuration preset to start from
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Number of sampled sources
    #[arg(short = 'n', long, conflicts_with = "all_sources")]
    pub sources: Option<usize>,

    /// Use every participant as a source
    #[arg(long)]
    pub all_sources: bool,

    /// Distance types (repeatable)
    #[arg(short, long, value_enum)]
    pub distance: Vec<DistanceArg>,

    /// Engine (default: chosen from the network)
    #[arg(short, long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Number of worker tasks
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Check every query against all engines
    #[arg(long)]
    pub cross_validate: bool,

    /// Ignore channels before this timestamp (default: earliest channel)
    #[arg(short, long)]
    pub min_timing: Option<String>,

    /// Write per-source results as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a configuration file
    Init {
        /// Simulation preset to write
        #[arg(short, long, value_enum, default_value = "default")]
        preset: PresetArg,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Distance type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DistanceArg {
    /// Fewest channels
    Shortest,
    /// Least time between first and last channel
    Fastest,
    /// Earliest arrival
    Foremost,
}

/// Engine argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AlgorithmArg {
    /// Label-setting search over participants
    DijkstraVertices,
    /// Dijkstra over channels
    DijkstraHyperedges,
    /// Iterated relaxation
    BellmanFord,
}

/// Simulation preset argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced defaults
    Default,
    /// Small sample, foremost only
    Quick,
    /// Every participant, cross-validated
    Exhaustive,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<DistanceArg> for DistanceType {
    fn from(distance: DistanceArg) -> Self {
        match distance {
            DistanceArg::Shortest => DistanceType::Shortest,
            DistanceArg::Fastest => DistanceType::Fastest,
            DistanceArg::Foremost => DistanceType::Foremost,
        }
    }
}

impl From<AlgorithmArg> for Algorithm {
    fn from(algorithm: AlgorithmArg) -> Self {
        match algorithm {
            AlgorithmArg::DijkstraVertices => Algorithm::DijkstraVertices,
            AlgorithmArg::DijkstraHyperedges => Algorithm::DijkstraHyperedges,
            AlgorithmArg::BellmanFord => Algorithm::BellmanFord,
        }
    }
}

impl From<PresetArg> for crate::config::SimulationConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => crate::config::SimulationConfig::default(),
            PresetArg::Quick => crate::config::SimulationConfig::quick(),
            PresetArg::Exhaustive => crate::config::SimulationConfig::exhaustive(),
        }
    }
}
