//! Format dispatch
//!
//! An external graph value is either a strided numeric buffer (adjacency
//! matrix) or an opaque graph object. The choice is made once per request
//! and never retried the other way.

use tracing::debug;

use super::adjacency::AdjacencySource;
use super::dense::dense_to_neighbor_list;
use super::sparse::graph_to_neighbor_list;
use crate::errors::{Result, Se2Error};
use crate::features::signal::RequestContext;
use crate::shared::models::{NeighborList, StridedBuffer};

/// What a host value offers to the dispatcher
pub trait HostValue {
    /// Strided view if the value exposes a buffer interface
    fn strided_view(&self) -> Result<Option<StridedBuffer<'_>>>;

    /// Graph object view, consulted only when there is no buffer
    fn graph_object(&self) -> Option<&dyn AdjacencySource>;
}

/// Graph input after inspection
#[derive(Clone, Copy)]
pub enum GraphInput<'a> {
    Dense(StridedBuffer<'a>),
    Graph(&'a dyn AdjacencySource),
}

impl<'a> GraphInput<'a> {
    /// Classify a host value: buffer interface wins, graph object otherwise
    pub fn inspect(value: &'a dyn HostValue) -> Result<Self> {
        if let Some(view) = value.strided_view()? {
            return Ok(GraphInput::Dense(view));
        }
        value.graph_object().map(GraphInput::Graph).ok_or_else(|| {
            Se2Error::type_mismatch(
                "Graph must be an adjacency matrix (buffer interface) or a graph object.",
            )
        })
    }

    /// Node count as seen before conversion (rows for a dense buffer)
    pub fn node_count(&self) -> usize {
        match self {
            GraphInput::Dense(view) => view.n_rows(),
            GraphInput::Graph(graph) => graph.vcount(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GraphInput::Dense(_) => "dense",
            GraphInput::Graph(_) => "graph",
        }
    }

    pub fn as_graph(&self) -> Option<&'a dyn AdjacencySource> {
        match self {
            GraphInput::Graph(graph) => Some(*graph),
            GraphInput::Dense(_) => None,
        }
    }
}

impl<'a> From<StridedBuffer<'a>> for GraphInput<'a> {
    fn from(view: StridedBuffer<'a>) -> Self {
        GraphInput::Dense(view)
    }
}

impl<'a, G: AdjacencySource> From<&'a G> for GraphInput<'a> {
    fn from(graph: &'a G) -> Self {
        GraphInput::Graph(graph)
    }
}

/// Route to the matching converter.
///
/// `weights` only apply to graph objects; dense inputs carry their weights in
/// their values.
pub fn to_neighbor_list(
    input: &GraphInput<'_>,
    weights: Option<Vec<f64>>,
    ctx: &mut RequestContext<'_>,
) -> Result<NeighborList> {
    match input {
        GraphInput::Dense(view) => {
            if weights.is_some() {
                debug!("weight sequence ignored for dense adjacency input");
            }
            dense_to_neighbor_list(view, ctx)
        }
        GraphInput::Graph(graph) => graph_to_neighbor_list(*graph, weights, ctx),
    }
}
