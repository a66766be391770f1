//! Edge weight specification
//!
//! How a caller names the weights of a graph object: explicit values, an
//! external sequence, or an edge attribute on the graph itself.

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, Se2Error};
use crate::features::conversion::GraphInput;
use crate::features::tabular::decode_sequence;

/// Attribute name that silently means "unweighted" when the graph lacks it
pub const DEFAULT_WEIGHT_ATTRIBUTE: &str = "weight";

#[derive(Debug, Clone, Copy)]
pub enum Weights<'a> {
    Values(&'a [f64]),
    External(&'a Value),
    Attribute(&'a str),
}

impl Default for Weights<'_> {
    fn default() -> Self {
        Weights::Attribute(DEFAULT_WEIGHT_ATTRIBUTE)
    }
}

impl<'a> Weights<'a> {
    /// Resolve to a per-edge sequence, or `None` for unweighted.
    ///
    /// Attribute lookups only apply to graph objects; a dense input carries
    /// its weights in its values.
    pub fn resolve(&self, input: &GraphInput<'_>) -> Result<Option<Vec<f64>>> {
        match *self {
            Weights::Values(values) => Ok(Some(values.to_vec())),
            Weights::External(value) => decode_sequence(value, "weights").map(Some),
            Weights::Attribute(name) => {
                let Some(graph) = input.as_graph() else {
                    debug!(attribute = name, "attribute weights ignored for dense input");
                    return Ok(None);
                };
                match graph.edge_attribute(name) {
                    Some(values) => Ok(Some(values)),
                    None if name == DEFAULT_WEIGHT_ATTRIBUTE => Ok(None),
                    None => Err(Se2Error::key(format!(
                        "Graph does not have edge attribute {}",
                        name
                    ))),
                }
            }
        }
    }
}

pub(crate) fn resolve_weights(
    weights: Option<Weights<'_>>,
    input: &GraphInput<'_>,
) -> Result<Option<Vec<f64>>> {
    match weights {
        Some(weights) => weights.resolve(input),
        None => Ok(None),
    }
}
