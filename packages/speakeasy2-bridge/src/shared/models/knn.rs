//! k-nearest-neighbor engine output

/// Directed knn edges produced by the engine, one node per input column
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KnnEdges {
    pub n_nodes: usize,
    /// `(column, neighbor)` pairs
    pub edges: Vec<(usize, usize)>,
    /// Similarity per edge, present only when a weighted graph was requested
    pub weights: Option<Vec<f64>>,
}

impl KnnEdges {
    pub fn new(n_nodes: usize, edges: Vec<(usize, usize)>) -> Self {
        Self {
            n_nodes,
            edges,
            weights: None,
        }
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }
}
