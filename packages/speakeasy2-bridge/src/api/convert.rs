//! Conversion-only entry point
//!
//! Builds the canonical neighbor list without calling the engine. Useful to
//! inspect what the engine would receive for a given input.

use tracing::debug_span;

use super::weights::{resolve_weights, Weights};
use crate::errors::Result;
use crate::features::conversion::{to_neighbor_list, GraphInput};
use crate::features::signal::{HostSignals, RequestContext};
use crate::shared::models::NeighborList;

pub fn neighbor_list(
    host: &dyn HostSignals,
    input: GraphInput<'_>,
    weights: Option<Weights<'_>>,
) -> Result<NeighborList> {
    let span = debug_span!("se2_request", op = "neighbor_list", input = input.kind());
    let _enter = span.enter();

    let weights = resolve_weights(weights, &input)?;
    let mut ctx = RequestContext::new("neighbor_list", host);
    ctx.run(|ctx| to_neighbor_list(&input, weights, ctx))
}
