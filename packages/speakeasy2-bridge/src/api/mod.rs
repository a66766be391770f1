//! Public entry points
//!
//! Host-independent: each call takes the engine, a host for signals and the
//! already-inspected inputs. Host adapters (`adapters::pyo3`) only translate
//! arguments and results.

pub mod cluster;
pub mod convert;
pub mod engine;
pub mod knn;
pub mod order;
pub mod weights;

pub use cluster::cluster;
pub use convert::neighbor_list;
pub use engine::{AnalysisEngine, EngineResult};
pub use knn::knn_graph;
pub use order::order_nodes;
pub use weights::{Weights, DEFAULT_WEIGHT_ATTRIBUTE};
