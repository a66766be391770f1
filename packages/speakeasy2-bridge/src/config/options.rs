//! Clustering options
//!
//! Passed to the engine unmodified. Zero means "engine decides"; the bridge
//! never fills in defaults of its own. Host-facing defaults live in
//! [`Preset::Recommended`](super::Preset::Recommended).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{ConfigError, ConfigResult};

/// Largest value the engine's signed 32-bit option fields hold
pub const ENGINE_INT_MAX: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterOptions {
    /// Partitions to discard before tracking
    pub discard_transient: u32,
    pub independent_runs: u32,
    /// Worker pool size, 0 lets the engine pick
    pub max_threads: u32,
    pub random_seed: u32,
    /// Initial label count hint; must not exceed the node count
    pub target_clusters: u32,
    pub target_partitions: u32,
    /// Levels of clustering; above 1 the engine subclusters each community
    pub subcluster: u32,
    /// Smallest community considered for subclustering
    pub min_cluster: u32,
    pub verbose: bool,
}

/// Partial options, as written under `overrides:` in YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterOptionsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discard_transient: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub independent_runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_threads: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_clusters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_partitions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcluster: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cluster: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

impl ClusterOptions {
    pub fn discard_transient(mut self, v: u32) -> Self {
        self.discard_transient = v;
        self
    }

    pub fn independent_runs(mut self, v: u32) -> Self {
        self.independent_runs = v;
        self
    }

    pub fn max_threads(mut self, v: u32) -> Self {
        self.max_threads = v;
        self
    }

    pub fn random_seed(mut self, v: u32) -> Self {
        self.random_seed = v;
        self
    }

    pub fn target_clusters(mut self, v: u32) -> Self {
        self.target_clusters = v;
        self
    }

    pub fn target_partitions(mut self, v: u32) -> Self {
        self.target_partitions = v;
        self
    }

    pub fn subcluster(mut self, v: u32) -> Self {
        self.subcluster = v;
        self
    }

    pub fn min_cluster(mut self, v: u32) -> Self {
        self.min_cluster = v;
        self
    }

    pub fn verbose(mut self, v: bool) -> Self {
        self.verbose = v;
        self
    }

    /// Apply every field the patch sets
    pub fn apply(mut self, patch: &ClusterOptionsPatch) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if let Some(v) = patch.$field {
                    self.$field = v;
                })*
            };
        }
        take!(
            discard_transient,
            independent_runs,
            max_threads,
            random_seed,
            target_clusters,
            target_partitions,
            subcluster,
            min_cluster,
            verbose
        );
        self
    }

    /// Checks that need no graph.
    ///
    /// `target_clusters` against the node count is checked per request.
    pub fn validate(&self) -> ConfigResult<()> {
        let ints = [
            ("discard_transient", self.discard_transient),
            ("independent_runs", self.independent_runs),
            ("max_threads", self.max_threads),
            ("random_seed", self.random_seed),
            ("target_clusters", self.target_clusters),
            ("target_partitions", self.target_partitions),
            ("subcluster", self.subcluster),
            ("min_cluster", self.min_cluster),
        ];
        for (field, value) in ints {
            if value > ENGINE_INT_MAX {
                return Err(ConfigError::range(field, value, 0, ENGINE_INT_MAX));
            }
        }

        // The recommended preset itself sets min_cluster without subclustering
        if self.min_cluster_is_inert() {
            debug!(
                min_cluster = self.min_cluster,
                subcluster = self.subcluster,
                "min_cluster has no effect without subclustering"
            );
        }
        Ok(())
    }

    /// `min_cluster` is set but only one level will be produced
    pub fn min_cluster_is_inert(&self) -> bool {
        self.subcluster <= 1 && self.min_cluster != 0
    }
}
