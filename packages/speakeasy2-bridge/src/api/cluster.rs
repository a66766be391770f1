//! Community detection entry point

use serde_json::Value;
use tracing::{debug, debug_span};

use super::engine::AnalysisEngine;
use super::weights::{resolve_weights, Weights};
use crate::config::ClusterOptions;
use crate::errors::{Result, Se2Error};
use crate::features::conversion::{to_neighbor_list, GraphInput};
use crate::features::signal::{surface, HostSignals, RequestContext};
use crate::features::tabular::encode_matrix;

/// Cluster `input` and return the membership, flattened when there is a
/// single level.
///
/// `weights` only apply to graph objects. `target_clusters` is checked
/// against the node count before any neighbor list is built.
pub fn cluster(
    engine: &dyn AnalysisEngine,
    host: &dyn HostSignals,
    input: GraphInput<'_>,
    weights: Option<Weights<'_>>,
    options: &ClusterOptions,
) -> Result<Value> {
    let span = debug_span!("se2_request", op = "cluster", input = input.kind());
    let _enter = span.enter();

    options.validate()?;

    let node_count = input.node_count();
    if options.target_clusters as usize > node_count {
        return Err(Se2Error::value(
            "Number of target clusters cannot exceed the number of nodes in the graph.",
        ));
    }

    let weights = resolve_weights(weights, &input)?;

    let mut ctx = RequestContext::new("cluster", host);
    ctx.run(|ctx| {
        let list = to_neighbor_list(&input, weights, ctx)?;
        debug!(
            nodes = list.n_nodes(),
            entries = list.n_entries(),
            weighted = list.is_weighted(),
            "neighbor list built"
        );
        let list = ctx.finally.push("neighbor list", list);

        let membership = engine
            .cluster(ctx.finally.get(&list)?, options, ctx.hooks())
            .map_err(surface)?;
        let membership = ctx.finally.push("membership", membership);

        let encoded = encode_matrix(ctx.finally.get(&membership)?);
        ctx.finally.release(membership)?;
        ctx.finally.release(list)?;
        Ok(encoded)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::engine::testing::ScriptedEngine;
    use crate::errors::ErrorKind;
    use crate::features::conversion::EdgeListGraph;
    use crate::features::signal::{CauseCode, StdHost};
    use crate::shared::models::{ElementType, StridedBuffer};
    use serde_json::json;

    #[test]
    fn test_single_level_flattens() {
        let engine = ScriptedEngine::default();
        let g = EdgeListGraph::new(3, vec![(0, 1), (1, 2)], false);

        let memb = cluster(
            &engine,
            &StdHost::new(),
            GraphInput::from(&g),
            None,
            &ClusterOptions::default(),
        )
        .unwrap();

        assert_eq!(memb, json!([0, 1, 2]));
    }

    #[test]
    fn test_subclustering_is_nested() {
        let engine = ScriptedEngine::default();
        let g = EdgeListGraph::new(2, vec![(0, 1)], false);

        let memb = cluster(
            &engine,
            &StdHost::new(),
            GraphInput::from(&g),
            None,
            &ClusterOptions::default().subcluster(2),
        )
        .unwrap();

        assert_eq!(memb, json!([[0, 1], [0, 1]]));
    }

    #[test]
    fn test_target_clusters_checked_before_conversion() {
        let engine = ScriptedEngine::default();
        let g = EdgeListGraph::new(3, vec![(0, 1)], false);

        // Mismatched weights would fail conversion; the target check runs first
        let err = cluster(
            &engine,
            &StdHost::new(),
            GraphInput::from(&g),
            Some(Weights::Values(&[1.0, 2.0])),
            &ClusterOptions::default().target_clusters(4),
        )
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Value);
        assert!(engine.seen_lists.borrow().is_empty());
    }

    #[test]
    fn test_options_reach_engine_unmodified() {
        let engine = ScriptedEngine::default();
        let g = EdgeListGraph::new(2, vec![(0, 1)], false);
        let opts = ClusterOptions::default().random_seed(11).max_threads(2);

        cluster(&engine, &StdHost::new(), GraphInput::from(&g), None, &opts).unwrap();

        assert_eq!(engine.seen_options.borrow()[0], opts);
    }

    #[test]
    fn test_dense_input_weighted_by_value() {
        let engine = ScriptedEngine::default();
        let data = [0.0f64, 0.5, 0.5, 0.0];
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_ne_bytes()).collect();
        let view = StridedBuffer::contiguous(&bytes, 2, 2, ElementType::Float64).unwrap();

        cluster(
            &engine,
            &StdHost::new(),
            GraphInput::from(view),
            Some(Weights::default()),
            &ClusterOptions::default(),
        )
        .unwrap();

        assert!(engine.seen_lists.borrow()[0].is_weighted());
    }

    #[test]
    fn test_engine_fault_surfaces() {
        let engine = ScriptedEngine::failing(CauseCode::OutOfMemory);
        let g = EdgeListGraph::new(2, vec![(0, 1)], false);

        let err = cluster(
            &engine,
            &StdHost::new(),
            GraphInput::from(&g),
            None,
            &ClusterOptions::default(),
        )
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::OutOfMemory);
        assert_eq!(err.file.as_deref(), Some("engine.c"));
        assert_eq!(err.line, Some(7));
    }

    #[test]
    fn test_missing_named_attribute() {
        let engine = ScriptedEngine::default();
        let g = EdgeListGraph::new(2, vec![(0, 1)], false);

        let err = cluster(
            &engine,
            &StdHost::new(),
            GraphInput::from(&g),
            Some(Weights::Attribute("length")),
            &ClusterOptions::default(),
        )
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Key);
    }
}
