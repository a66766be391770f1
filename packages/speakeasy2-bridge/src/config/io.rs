//! YAML loading and export
//!
//! ```yaml
//! version: 1
//! preset: recommended
//! overrides:
//!   random_seed: 42
//!   subcluster: 3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::options::{ClusterOptions, ClusterOptionsPatch};
use super::preset::Preset;

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Base preset
    #[serde(default)]
    pub preset: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ClusterOptionsPatch>,
}

impl ClusterOptions {
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = match export.preset.as_deref() {
            Some(name) => name.parse::<Preset>()?,
            None => Preset::default(),
        };

        let mut options = preset.options();
        if let Some(overrides) = &export.overrides {
            options = options.apply(overrides);
        }
        options.validate()?;

        debug!(%preset, ?options, "cluster options loaded");
        Ok(options)
    }

    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export as the `engine` preset with every field overridden
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: Some(Preset::Engine.to_string()),
            overrides: Some(ClusterOptionsPatch {
                discard_transient: Some(self.discard_transient),
                independent_runs: Some(self.independent_runs),
                max_threads: Some(self.max_threads),
                random_seed: Some(self.random_seed),
                target_clusters: Some(self.target_clusters),
                target_partitions: Some(self.target_partitions),
                subcluster: Some(self.subcluster),
                min_cluster: Some(self.min_cluster),
                verbose: Some(self.verbose),
            }),
        };

        Ok(serde_yaml::to_string(&export)?)
    }
}
