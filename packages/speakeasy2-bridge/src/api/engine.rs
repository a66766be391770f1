//! Analysis engine port
//!
//! The clustering, knn and ordering algorithms live outside this crate. They
//! see only the canonical structures and report failures as
//! [`EngineFault`]s through the hooks they are handed.

use std::sync::Arc;

use crate::config::ClusterOptions;
use crate::features::signal::{EngineFault, EngineHooks};
use crate::shared::models::{IntMatrix, KnnEdges, NeighborList, RealMatrix};

pub type EngineResult<T> = std::result::Result<T, EngineFault>;

pub trait AnalysisEngine {
    /// Community detection. One membership row per clustering level.
    fn cluster(
        &self,
        graph: &NeighborList,
        options: &ClusterOptions,
        hooks: &dyn EngineHooks,
    ) -> EngineResult<IntMatrix>;

    /// Directed knn graph between the columns of `coords`
    fn knn_graph(
        &self,
        coords: &RealMatrix,
        k: usize,
        weighted: bool,
        hooks: &dyn EngineHooks,
    ) -> EngineResult<KnnEdges>;

    /// Node ordering with the same shape as `membership`
    fn order_nodes(
        &self,
        graph: &NeighborList,
        membership: &IntMatrix,
        hooks: &dyn EngineHooks,
    ) -> EngineResult<IntMatrix>;
}

impl<E: AnalysisEngine + ?Sized> AnalysisEngine for &E {
    fn cluster(
        &self,
        graph: &NeighborList,
        options: &ClusterOptions,
        hooks: &dyn EngineHooks,
    ) -> EngineResult<IntMatrix> {
        (**self).cluster(graph, options, hooks)
    }

    fn knn_graph(
        &self,
        coords: &RealMatrix,
        k: usize,
        weighted: bool,
        hooks: &dyn EngineHooks,
    ) -> EngineResult<KnnEdges> {
        (**self).knn_graph(coords, k, weighted, hooks)
    }

    fn order_nodes(
        &self,
        graph: &NeighborList,
        membership: &IntMatrix,
        hooks: &dyn EngineHooks,
    ) -> EngineResult<IntMatrix> {
        (**self).order_nodes(graph, membership, hooks)
    }
}

impl<E: AnalysisEngine + ?Sized> AnalysisEngine for Arc<E> {
    fn cluster(
        &self,
        graph: &NeighborList,
        options: &ClusterOptions,
        hooks: &dyn EngineHooks,
    ) -> EngineResult<IntMatrix> {
        (**self).cluster(graph, options, hooks)
    }

    fn knn_graph(
        &self,
        coords: &RealMatrix,
        k: usize,
        weighted: bool,
        hooks: &dyn EngineHooks,
    ) -> EngineResult<KnnEdges> {
        (**self).knn_graph(coords, k, weighted, hooks)
    }

    fn order_nodes(
        &self,
        graph: &NeighborList,
        membership: &IntMatrix,
        hooks: &dyn EngineHooks,
    ) -> EngineResult<IntMatrix> {
        (**self).order_nodes(graph, membership, hooks)
    }
}
