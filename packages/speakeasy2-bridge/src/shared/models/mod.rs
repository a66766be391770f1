//! Shared data models
//!
//! - `NeighborList`: canonical per-node adjacency handed to the engine
//! - `DenseMatrix`: membership / ordering / coordinate grids
//! - `StridedBuffer`: read-only view over external numeric memory
//! - `KnnEdges`: engine output for knn graph construction

pub mod knn;
pub mod matrix;
pub mod neighbor_list;
pub mod strided;

pub use knn::KnnEdges;
pub use matrix::{DenseMatrix, IntMatrix, RealMatrix};
pub use neighbor_list::{Adjacency, NeighborList};
pub use strided::{ElementType, StridedBuffer};
