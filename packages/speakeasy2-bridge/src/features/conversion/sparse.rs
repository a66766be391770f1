//! Graph object → neighbor list
//!
//! Delegates the adjacency walk to the graph library. Unlike the dense path,
//! the weighted/unweighted choice is made by whether a weight sequence was
//! supplied, not by looking at values.

use tracing::debug;

use super::adjacency::AdjacencySource;
use crate::errors::{Result, Se2Error};
use crate::features::signal::RequestContext;
use crate::shared::models::NeighborList;

pub fn graph_to_neighbor_list(
    graph: &dyn AdjacencySource,
    weights: Option<Vec<f64>>,
    ctx: &mut RequestContext<'_>,
) -> Result<NeighborList> {
    let Some(weights) = weights else {
        debug!(vcount = graph.vcount(), ecount = graph.ecount(), "graph object, unweighted");
        return graph.to_neighbor_list(None);
    };

    let slot = ctx.finally.push("edge weights", weights);

    // The adjacency routine assumes this precondition
    let n_weights = ctx.finally.get(&slot)?.len();
    if n_weights != graph.ecount() {
        return Err(Se2Error::cardinality(graph.ecount(), n_weights));
    }

    debug!(vcount = graph.vcount(), ecount = graph.ecount(), "graph object, weighted");
    let result = graph.to_neighbor_list(Some(ctx.finally.get(&slot)?.as_slice()));
    ctx.finally.release(slot)?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::features::conversion::adjacency::EdgeListGraph;
    use crate::features::signal::StdHost;
    use std::cell::Cell;

    /// Graph stub that counts adjacency-routine calls
    struct CountingGraph {
        inner: EdgeListGraph,
        calls: Cell<usize>,
        fail: bool,
    }

    impl AdjacencySource for CountingGraph {
        fn vcount(&self) -> usize {
            self.inner.vcount()
        }

        fn ecount(&self) -> usize {
            self.inner.ecount()
        }

        fn is_directed(&self) -> bool {
            self.inner.is_directed()
        }

        fn to_neighbor_list(&self, weights: Option<&[f64]>) -> Result<NeighborList> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(Se2Error::runtime("adjacency walk failed"));
            }
            self.inner.to_neighbor_list(weights)
        }
    }

    fn path_graph(fail: bool) -> CountingGraph {
        CountingGraph {
            inner: EdgeListGraph::new(3, vec![(0, 1), (1, 2)], false),
            calls: Cell::new(0),
            fail,
        }
    }

    #[test]
    fn test_weight_count_mismatch_skips_routine() {
        let graph = path_graph(false);
        let host = StdHost::new();
        let mut ctx = RequestContext::new("cluster", &host);

        let err = ctx
            .run(|ctx| graph_to_neighbor_list(&graph, Some(vec![1.0]), ctx))
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Cardinality);
        assert_eq!(graph.calls.get(), 0);
        assert!(ctx.finally.is_empty());
    }

    #[test]
    fn test_weighted_delegation_releases_buffer() {
        let graph = path_graph(false);
        let host = StdHost::new();
        let mut ctx = RequestContext::new("cluster", &host);

        let list = graph_to_neighbor_list(&graph, Some(vec![0.5, 2.0]), &mut ctx).unwrap();

        assert!(list.is_weighted());
        assert_eq!(list.weight_row(1), Some(&[0.5, 0.0, 2.0][..]));
        assert_eq!(graph.calls.get(), 1);
        assert!(ctx.finally.is_empty());
    }

    #[test]
    fn test_buffer_released_when_routine_fails() {
        let graph = path_graph(true);
        let host = StdHost::new();
        let mut ctx = RequestContext::new("cluster", &host);

        let err = graph_to_neighbor_list(&graph, Some(vec![0.5, 2.0]), &mut ctx).unwrap_err();

        assert_eq!(err.kind, ErrorKind::Runtime);
        assert!(ctx.finally.is_empty());
    }

    #[test]
    fn test_unweighted_delegation() {
        let graph = path_graph(false);
        let host = StdHost::new();
        let mut ctx = RequestContext::new("cluster", &host);

        let list = graph_to_neighbor_list(&graph, None, &mut ctx).unwrap();
        assert!(!list.is_weighted());
        assert_eq!(list.neighbors(1), Some(&[0, 2][..]));
    }
}
