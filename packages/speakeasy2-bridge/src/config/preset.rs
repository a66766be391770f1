//! Preset option sets

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::options::ClusterOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Every option zero; the engine chooses
    #[default]
    Engine,

    /// Host-facing defaults
    ///
    /// - discard_transient=3, independent_runs=10
    /// - target_partitions=5, subcluster=1, min_cluster=5
    Recommended,
}

impl Preset {
    pub fn options(&self) -> ClusterOptions {
        match self {
            Self::Engine => ClusterOptions::default(),
            Self::Recommended => ClusterOptions::default()
                .discard_transient(3)
                .independent_runs(10)
                .target_partitions(5)
                .subcluster(1)
                .min_cluster(5),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::Recommended => "recommended",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "engine" => Ok(Self::Engine),
            "recommended" => Ok(Self::Recommended),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ClusterOptions {
    pub fn preset(preset: Preset) -> Self {
        preset.options()
    }
}
