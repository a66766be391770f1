//! Graph → canonical neighbor list conversion
//!
//! - `dense`: strided adjacency matrices, weighted-ness decided by value
//! - `sparse`: graph objects through the graph library's adjacency walk
//! - `adjacency`: the graph-object contract (petgraph, edge-list graphs)
//! - `dispatch`: picks one of the two per request

pub mod adjacency;
pub mod dense;
pub mod dispatch;
pub mod sparse;

pub use adjacency::{neighbor_list_from_edges, AdjacencySource, EdgeListGraph, EdgeValue};
pub use dense::{dense_to_neighbor_list, is_unweighted, TOLERANCE};
pub use dispatch::{to_neighbor_list, GraphInput, HostValue};
pub use sparse::graph_to_neighbor_list;
