//! Canonical neighbor list
//!
//! The pivot structure handed to the analysis engine. The weighted and
//! unweighted layouts are separate enum variants, so a list can never carry
//! both (or switch between them) once constructed.

use serde::Serialize;

/// Adjacency payload of a [`NeighborList`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjacency {
    /// Per-node neighbor indices plus their counts
    Unweighted {
        neigh_list: Vec<Vec<usize>>,
        sizes: Vec<usize>,
    },
    /// Per-node dense rows of length `n_nodes`; 0 means no edge
    Weighted { weights: Vec<Vec<f64>> },
}

/// Per-node adjacency consumed by the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborList {
    n_nodes: usize,
    /// Filled lazily by the engine
    pub total_weight: f64,
    adjacency: Adjacency,
}

impl NeighborList {
    /// Unweighted list with `n_nodes` empty neighbor sequences
    pub fn unweighted(n_nodes: usize) -> Self {
        Self {
            n_nodes,
            total_weight: 0.0,
            adjacency: Adjacency::Unweighted {
                neigh_list: vec![Vec::new(); n_nodes],
                sizes: vec![0; n_nodes],
            },
        }
    }

    /// Weighted list with `n_nodes` zero rows
    pub fn weighted(n_nodes: usize) -> Self {
        Self {
            n_nodes,
            total_weight: 0.0,
            adjacency: Adjacency::Weighted {
                weights: vec![vec![0.0; n_nodes]; n_nodes],
            },
        }
    }

    /// Build an unweighted list from finished neighbor sequences
    pub fn from_neighbors(neigh_list: Vec<Vec<usize>>) -> Self {
        let sizes = neigh_list.iter().map(Vec::len).collect();
        Self {
            n_nodes: neigh_list.len(),
            total_weight: 0.0,
            adjacency: Adjacency::Unweighted { neigh_list, sizes },
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    pub fn is_weighted(&self) -> bool {
        matches!(self.adjacency, Adjacency::Weighted { .. })
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Neighbor indices of `node` (unweighted lists only)
    pub fn neighbors(&self, node: usize) -> Option<&[usize]> {
        match &self.adjacency {
            Adjacency::Unweighted { neigh_list, .. } => neigh_list.get(node).map(Vec::as_slice),
            Adjacency::Weighted { .. } => None,
        }
    }

    /// Neighbor count of `node` (unweighted lists only)
    pub fn size(&self, node: usize) -> Option<usize> {
        match &self.adjacency {
            Adjacency::Unweighted { sizes, .. } => sizes.get(node).copied(),
            Adjacency::Weighted { .. } => None,
        }
    }

    /// Dense weight row of `node` (weighted lists only)
    pub fn weight_row(&self, node: usize) -> Option<&[f64]> {
        match &self.adjacency {
            Adjacency::Weighted { weights } => weights.get(node).map(Vec::as_slice),
            Adjacency::Unweighted { .. } => None,
        }
    }

    /// Replace the neighbors of `node`, keeping `sizes` in step
    pub(crate) fn set_neighbors(&mut self, node: usize, neighbors: Vec<usize>) {
        if let Adjacency::Unweighted { neigh_list, sizes } = &mut self.adjacency {
            sizes[node] = neighbors.len();
            neigh_list[node] = neighbors;
        }
    }

    /// Mutable dense row of `node` (weighted lists only)
    pub(crate) fn weight_row_mut(&mut self, node: usize) -> Option<&mut [f64]> {
        match &mut self.adjacency {
            Adjacency::Weighted { weights } => weights.get_mut(node).map(Vec::as_mut_slice),
            Adjacency::Unweighted { .. } => None,
        }
    }

    /// Total number of stored neighbor entries (unweighted) or non-zero
    /// weights (weighted)
    pub fn n_entries(&self) -> usize {
        match &self.adjacency {
            Adjacency::Unweighted { sizes, .. } => sizes.iter().sum(),
            Adjacency::Weighted { weights } => weights
                .iter()
                .map(|row| row.iter().filter(|w| **w != 0.0).count())
                .sum(),
        }
    }
}
