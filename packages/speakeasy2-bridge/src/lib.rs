/*
 * SpeakEasy2 Bridge - graph marshalling for the SpeakEasy2 engine
 *
 * Feature-First Layout:
 * - shared/      : Common models (NeighborList, DenseMatrix, StridedBuffer)
 * - features/    : element → conversion → tabular, plus lifetime + signal
 * - config/      : ClusterOptions, presets, YAML v1
 * - api/         : Engine port and public entry points
 * - adapters/    : Host bindings (PyO3)
 *
 * One request = one RequestContext: signal bridge + unwind stack, nothing
 * global.
 */

#![allow(clippy::too_many_arguments)] // Host-facing option lists
#![allow(clippy::new_without_default)]

#[cfg(feature = "python")]
use pyo3::prelude::*;

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Conversion features
pub mod features;

/// Clustering options
pub mod config;

/// Public entry points
pub mod api;

/// Host adapters
pub mod adapters;

/// Crate errors
pub mod errors;

pub use api::{cluster, knn_graph, neighbor_list, order_nodes, AnalysisEngine, Weights};
pub use config::{ClusterOptions, Preset};
pub use errors::{ErrorKind, Result, Se2Error};
pub use features::conversion::{AdjacencySource, EdgeListGraph, GraphInput, HostValue};
pub use features::signal::{CancelToken, EngineFault, EngineHooks, HostSignals, StdHost};
pub use shared::models::{IntMatrix, KnnEdges, NeighborList, RealMatrix, StridedBuffer};

// ═══════════════════════════════════════════════════════════════════════════
// Python Module
// ═══════════════════════════════════════════════════════════════════════════

/// Engine-independent part of the Python module. Engine builds call
/// [`adapters::pyo3::register`] from their own `#[pymodule]` to add
/// `cluster`, `knn_graph` and `order_nodes`.
#[cfg(feature = "python")]
#[pymodule]
fn speakeasy2_bridge(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<adapters::pyo3::PySpeakEasy2>()?;
    m.add_function(wrap_pyfunction!(adapters::pyo3::neighbor_list, m)?)?;
    Ok(())
}
