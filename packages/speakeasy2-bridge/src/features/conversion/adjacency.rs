//! Graph-library adjacency contract
//!
//! The opaque graph object is only ever reached through [`AdjacencySource`].
//! Its `to_neighbor_list` is the library's own O(E) adjacency walk; the
//! bridge never iterates a foreign graph itself.
//!
//! Conventions shared by every implementation here:
//! - a node's neighbors are the sources of its incoming edges
//! - undirected edges count in both directions (self-loops once)
//! - neighbor sequences are sorted ascending
//! - weighted rows accumulate parallel edges

use std::collections::BTreeMap;

use petgraph::graph::{Graph, IndexType};
use petgraph::visit::EdgeRef;
use petgraph::EdgeType;

use crate::errors::{Result, Se2Error};
use crate::shared::models::NeighborList;

/// Narrow view of a foreign graph object
pub trait AdjacencySource {
    fn vcount(&self) -> usize;

    fn ecount(&self) -> usize;

    fn is_directed(&self) -> bool;

    /// Per-edge numeric attribute, in edge order, if the graph carries one
    fn edge_attribute(&self, _name: &str) -> Option<Vec<f64>> {
        None
    }

    /// Build the canonical neighbor list.
    ///
    /// Precondition: `weights`, when present, has exactly `ecount()` entries.
    /// Weighted output is chosen by presence of `weights` alone.
    fn to_neighbor_list(&self, weights: Option<&[f64]>) -> Result<NeighborList>;
}

/// Shared adjacency walk over an edge iterator
pub fn neighbor_list_from_edges<I>(
    n_nodes: usize,
    directed: bool,
    edges: I,
    weights: Option<&[f64]>,
) -> Result<NeighborList>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let check = |from: usize, to: usize| {
        if from >= n_nodes || to >= n_nodes {
            Err(Se2Error::value(format!(
                "Edge ({}, {}) refers to a node outside 0..{}.",
                from, to, n_nodes
            )))
        } else {
            Ok(())
        }
    };

    match weights {
        Some(weights) => {
            let edges: Vec<(usize, usize)> = edges.into_iter().collect();
            if edges.len() != weights.len() {
                return Err(Se2Error::cardinality(edges.len(), weights.len()));
            }
            let mut list = NeighborList::weighted(n_nodes);
            for (&(from, to), &w) in edges.iter().zip(weights) {
                check(from, to)?;
                add_weight(&mut list, to, from, w)?;
                if !directed && from != to {
                    add_weight(&mut list, from, to, w)?;
                }
            }
            Ok(list)
        }
        None => {
            let mut neigh_list = vec![Vec::new(); n_nodes];
            for (from, to) in edges {
                check(from, to)?;
                neigh_list[to].push(from);
                if !directed && from != to {
                    neigh_list[from].push(to);
                }
            }
            for neighbors in &mut neigh_list {
                neighbors.sort_unstable();
            }
            Ok(NeighborList::from_neighbors(neigh_list))
        }
    }
}

fn add_weight(list: &mut NeighborList, node: usize, neighbor: usize, w: f64) -> Result<()> {
    let row = list
        .weight_row_mut(node)
        .ok_or_else(|| Se2Error::internal("weighted list lost its rows"))?;
    row[neighbor] += w;
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// petgraph
// ═══════════════════════════════════════════════════════════════════════════

/// Edge payloads that can act as a numeric `"weight"` attribute
pub trait EdgeValue {
    fn as_weight(&self) -> Option<f64>;
}

impl EdgeValue for () {
    fn as_weight(&self) -> Option<f64> {
        None
    }
}

macro_rules! numeric_edge_value {
    ($($ty:ty),*) => {
        $(impl EdgeValue for $ty {
            fn as_weight(&self) -> Option<f64> {
                Some(*self as f64)
            }
        })*
    };
}

numeric_edge_value!(f32, f64, i32, i64, u32, u64, usize);

impl<N, E, Ty, Ix> AdjacencySource for Graph<N, E, Ty, Ix>
where
    E: EdgeValue,
    Ty: EdgeType,
    Ix: IndexType,
{
    fn vcount(&self) -> usize {
        self.node_count()
    }

    fn ecount(&self) -> usize {
        self.edge_count()
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Numeric edge payloads are exposed as the `"weight"` attribute
    fn edge_attribute(&self, name: &str) -> Option<Vec<f64>> {
        if name != "weight" {
            return None;
        }
        self.edge_references().map(|e| e.weight().as_weight()).collect()
    }

    fn to_neighbor_list(&self, weights: Option<&[f64]>) -> Result<NeighborList> {
        let edges = self
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()));
        neighbor_list_from_edges(self.node_count(), Ty::is_directed(), edges, weights)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Edge List Graph
// ═══════════════════════════════════════════════════════════════════════════

/// Plain edge-list graph object with named numeric edge attributes.
///
/// This is the shape host graph objects are extracted into.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeListGraph {
    n_nodes: usize,
    directed: bool,
    edges: Vec<(usize, usize)>,
    attributes: BTreeMap<String, Vec<f64>>,
}

impl EdgeListGraph {
    pub fn new(n_nodes: usize, edges: Vec<(usize, usize)>, directed: bool) -> Self {
        Self {
            n_nodes,
            directed,
            edges,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach a per-edge attribute; its length must match the edge count
    pub fn with_attribute(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.edges.len() {
            return Err(Se2Error::cardinality(self.edges.len(), values.len()));
        }
        self.attributes.insert(name.into(), values);
        Ok(self)
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

impl AdjacencySource for EdgeListGraph {
    fn vcount(&self) -> usize {
        self.n_nodes
    }

    fn ecount(&self) -> usize {
        self.edges.len()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn edge_attribute(&self, name: &str) -> Option<Vec<f64>> {
        self.attributes.get(name).cloned()
    }

    fn to_neighbor_list(&self, weights: Option<&[f64]>) -> Result<NeighborList> {
        neighbor_list_from_edges(self.n_nodes, self.directed, self.edges.iter().copied(), weights)
    }
}
