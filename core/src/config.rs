//! Solver configuration
//!
//! Configuration is a plain serde structure so it can be read from JSON files
//! by front-ends and forwarded to solvers unchanged. Every field has a default,
//! so partial documents are accepted.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the bottleneck of an augmenting path is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckScan {
    /// Scan every edge on the path for the true minimum residual
    #[default]
    FullPath,
    /// Take the first residual found. Only correct when every edge has
    /// capacity one, as in the bipartite matching reduction.
    UnitCapacity,
}

impl BottleneckScan {
    pub fn as_str(&self) -> &'static str {
        match self {
            BottleneckScan::FullPath => "full_path",
            BottleneckScan::UnitCapacity => "unit_capacity",
        }
    }

    pub fn variants() -> Vec<String> {
        vec!["full_path".to_string(), "unit_capacity".to_string()]
    }
}

impl fmt::Display for BottleneckScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BottleneckScan {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "full_path" => Ok(BottleneckScan::FullPath),
            "unit_capacity" => Ok(BottleneckScan::UnitCapacity),
            other => Err(ConfigError::InvalidValue {
                field: "bottleneck_scan".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Tunables shared by the max-flow driver and its adapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Bottleneck computation strategy
    pub bottleneck_scan: BottleneckScan,
    /// Upper bound on augmentations; `None` runs to completion
    pub max_augmentations: Option<usize>,
    /// Whether `solve` extracts a minimum cut after the flow is maximal
    pub collect_min_cut: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            bottleneck_scan: BottleneckScan::FullPath,
            max_augmentations: None,
            collect_min_cut: true,
        }
    }
}

impl SolverConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.display().to_string(),
            reason: error.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_augmentations == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_augmentations".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed configuration: {0}")]
    Parse(String),

    #[error("Invalid value {value:?} for {field}")]
    InvalidValue { field: String, value: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse(error.to_string())
    }
}
