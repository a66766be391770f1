//! k-nearest-neighbor graph entry point

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, debug_span};

use super::engine::AnalysisEngine;
use crate::errors::{Result, Se2Error};
use crate::features::element::to_real_matrix;
use crate::features::signal::{surface, HostSignals, RequestContext};
use crate::shared::models::{KnnEdges, StridedBuffer};

/// Build the knn graph between the columns of `cols`.
///
/// Returns the directed graph and its edge weights; the weights are empty
/// unless `is_weighted`.
pub fn knn_graph(
    engine: &dyn AnalysisEngine,
    host: &dyn HostSignals,
    cols: &StridedBuffer<'_>,
    k: usize,
    is_weighted: bool,
) -> Result<(DiGraph<(), ()>, Vec<f64>)> {
    let span = debug_span!("se2_request", op = "knn_graph", k, is_weighted);
    let _enter = span.enter();

    if cols.ndim() != 2 {
        return Err(Se2Error::shape("Cols must be 2-dimensional."));
    }
    let element_type = cols.element_type();
    if !element_type.is_numeric() {
        return Err(Se2Error::value("Cols must be numeric."));
    }
    if element_type.is_complex() {
        return Err(Se2Error::value("Cols must be real not complex."));
    }

    let mut ctx = RequestContext::new("knn_graph", host);
    ctx.run(|ctx| {
        let coords = ctx.finally.push("coordinates", to_real_matrix(cols, "cols")?);

        let edges = engine
            .knn_graph(ctx.finally.get(&coords)?, k, is_weighted, ctx.hooks())
            .map_err(surface)?;
        ctx.finally.release(coords)?;

        debug!(nodes = edges.n_nodes, edges = edges.edges.len(), "knn edges received");
        into_graph(edges, is_weighted)
    })
}

fn into_graph(knn: KnnEdges, is_weighted: bool) -> Result<(DiGraph<(), ()>, Vec<f64>)> {
    let mut graph = DiGraph::with_capacity(knn.n_nodes, knn.edges.len());
    for _ in 0..knn.n_nodes {
        graph.add_node(());
    }
    for &(from, to) in &knn.edges {
        if from >= knn.n_nodes || to >= knn.n_nodes {
            return Err(Se2Error::internal(format!(
                "knn edge ({}, {}) outside 0..{}",
                from, to, knn.n_nodes
            )));
        }
        graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
    }

    if !is_weighted {
        return Ok((graph, Vec::new()));
    }

    let weights = knn.weights.unwrap_or_default();
    if weights.len() != knn.edges.len() {
        return Err(Se2Error::internal(format!(
            "knn returned {} weights for {} edges",
            weights.len(),
            knn.edges.len()
        )));
    }
    Ok((graph, weights))
}
