//! Clustering configuration
//!
//! - Preset: `ClusterOptions::preset(Preset::Recommended)`
//! - Builder: `.random_seed(42).subcluster(3)`
//! - YAML v1: `ClusterOptions::from_yaml("se2.yaml")?`

pub mod error;
pub mod io;
pub mod options;
pub mod preset;

pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
pub use options::{ClusterOptions, ClusterOptionsPatch, ENGINE_INT_MAX};
pub use preset::Preset;
