//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use reachnet_model::DistanceType;
use reachnet_paths::Algorithm;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Defaults for the `simulate` command
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Parameters of a simulation run
///
/// # Examples
///
/// ```
/// use reachnet_cli::config::SimulationConfig;
///
/// let config = SimulationConfig::default();
/// assert_eq!(config.sources, Some(100));
///
/// let config = SimulationConfig::quick();
/// assert_eq!(config.sources, Some(10));
///
/// // Every participant as a source
/// let config = SimulationConfig::exhaustive();
/// assert_eq!(config.sources, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of sources sampled from the participants; all when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<usize>,

    /// Distance types computed for every source
    #[serde(default = "default_distance_types")]
    pub distance_types: Vec<DistanceType>,

    /// Engine to use; picked per network when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,

    /// Number of blocking worker tasks
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Run every engine per query and fail on disagreement
    #[serde(default)]
    pub cross_validate: bool,

    /// Width in hours of one bucket of the reach-over-time curve
    #[serde(default = "default_bucket_hours")]
    pub bucket_hours: u64,

    /// Number of buckets in the reach-over-time curve
    #[serde(default = "default_buckets")]
    pub buckets: usize,
}

impl Default for SimulationConfig {
    /// Balanced defaults: 100 sampled sources, every distance type
    fn default() -> Self {
        Self {
            sources: Some(100),
            distance_types: default_distance_types(),
            algorithm: None,
            workers: default_workers(),
            cross_validate: false,
            bucket_hours: default_bucket_hours(),
            buckets: default_buckets(),
        }
    }
}

impl SimulationConfig {
    /// Small sample, foremost only; for a first look at a network
    pub fn quick() -> Self {
        Self {
            sources: Some(10),
            distance_types: vec![DistanceType::Foremost],
            workers: 1,
            ..Self::default()
        }
    }

    /// Every participant, every distance type, checked against all engines
    pub fn exhaustive() -> Self {
        Self {
            sources: None,
            cross_validate: true,
            ..Self::default()
        }
    }

    /// Preset by name
    pub fn preset(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(Self::default()),
            "quick" => Ok(Self::quick()),
            "exhaustive" => Ok(Self::exhaustive()),
            other => Err(CliError::Config(format!("Unknown preset '{}'", other))),
        }
    }

    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(CliError::Config("workers must be at least 1".into()));
        }
        if self.sources == Some(0) {
            return Err(CliError::Config("sources must be at least 1".into()));
        }
        if self.distance_types.is_empty() {
            return Err(CliError::Config("at least one distance type is required".into()));
        }
        if self.bucket_hours == 0 {
            return Err(CliError::Config("bucket_hours must be at least 1".into()));
        }
        Ok(())
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".reachnet").join("config.toml"))
    }

    /// Load configuration from the default path or return defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file, defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.simulation.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_distance_types() -> Vec<DistanceType> {
    DistanceType::ALL.to_vec()
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_bucket_hours() -> u64 {
    24
}

fn default_buckets() -> usize {
    28
}
