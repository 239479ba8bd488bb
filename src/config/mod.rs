//! Configuration types for the OPTICS ordering pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::distance::DistanceMetric;

/// Configuration for the OPTICS traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticsConfig {
    /// Neighborhood radius
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Minimum neighbors for a point to count as a core point
    #[serde(default = "default_min_pts")]
    pub min_pts: usize,

    /// Distance metric used for region queries
    #[serde(default)]
    pub metric: DistanceMetric,
}

fn default_epsilon() -> f64 {
    1.0
}

fn default_min_pts() -> usize {
    1
}

impl Default for OpticsConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            min_pts: default_min_pts(),
            metric: DistanceMetric::default(),
        }
    }
}

/// Configuration for reading point CSV files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Whether the first CSV row is a header
    #[serde(default)]
    pub has_headers: bool,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    ','
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            has_headers: false,
            delimiter: default_delimiter(),
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub optics: OpticsConfig,

    #[serde(default)]
    pub input: InputConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
