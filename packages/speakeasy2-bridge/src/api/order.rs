//! Node ordering entry point

use serde_json::Value;
use tracing::{debug, debug_span};

use super::engine::AnalysisEngine;
use super::weights::{resolve_weights, Weights};
use crate::errors::Result;
use crate::features::conversion::{to_neighbor_list, GraphInput};
use crate::features::signal::{surface, HostSignals, RequestContext};
use crate::features::tabular::{decode_int_matrix, encode_matrix};

/// Order nodes so members of a community sit together.
///
/// `membership` is a flat label sequence or one sequence per clustering
/// level; the result has the same shape.
pub fn order_nodes(
    engine: &dyn AnalysisEngine,
    host: &dyn HostSignals,
    input: GraphInput<'_>,
    membership: &Value,
    weights: Option<Weights<'_>>,
) -> Result<Value> {
    let span = debug_span!("se2_request", op = "order_nodes", input = input.kind());
    let _enter = span.enter();

    let mut ctx = RequestContext::new("order_nodes", host);
    ctx.run(|ctx| {
        let memb = ctx
            .finally
            .push("membership", decode_int_matrix(membership, "membership")?);
        debug!(
            levels = ctx.finally.get(&memb)?.n_rows(),
            nodes = ctx.finally.get(&memb)?.n_cols(),
            "membership decoded"
        );

        let weights = resolve_weights(weights, &input)?;
        let list = to_neighbor_list(&input, weights, ctx)?;
        let list = ctx.finally.push("neighbor list", list);

        let order = engine
            .order_nodes(
                ctx.finally.get(&list)?,
                ctx.finally.get(&memb)?,
                ctx.hooks(),
            )
            .map_err(surface)?;

        ctx.finally.release(list)?;
        ctx.finally.release(memb)?;
        Ok(encode_matrix(&order))
    })
}
