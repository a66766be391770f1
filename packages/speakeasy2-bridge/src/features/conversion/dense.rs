//! Dense adjacency matrix → neighbor list
//!
//! Column `j` of the input describes node `j`: row `i` holds the edge from
//! node `i` into node `j`.
//!
//! Classification happens once, up front, by value: a matrix whose entries
//! are all (within [`TOLERANCE`]) exactly 0 or 1 is unweighted, anything
//! else is weighted.

use tracing::debug;

use crate::errors::{Result, Se2Error};
use crate::features::element::{element_reader, ElementReader};
use crate::features::signal::RequestContext;
use crate::shared::models::{NeighborList, StridedBuffer};

/// Absolute tolerance for "is 0" / "is 1" and for "is an edge"
pub const TOLERANCE: f64 = 1e-5;

/// Host argument name used in element-type errors
const FIELD: &str = "graph";

/// True iff every element is within tolerance of 0 or 1.
///
/// NaN and infinities are never near-binary, so they mark the matrix weighted.
pub fn is_unweighted(buffer: &StridedBuffer<'_>, read: ElementReader) -> bool {
    for j in 0..buffer.n_cols() {
        for i in 0..buffer.n_rows() {
            let value = read(buffer.element_bytes(i, j));
            let near_binary = value.abs() <= TOLERANCE || (value - 1.0).abs() <= TOLERANCE;
            if !near_binary {
                return false;
            }
        }
    }
    true
}

/// Convert a square strided adjacency matrix to the canonical neighbor list.
///
/// The list under construction lives on the context's unwind stack until it
/// is complete, so an interrupt between columns releases it.
pub fn dense_to_neighbor_list(
    buffer: &StridedBuffer<'_>,
    ctx: &mut RequestContext<'_>,
) -> Result<NeighborList> {
    if !buffer.is_square() {
        return Err(Se2Error::shape(format!(
            "Adjacency matrix must be square, got shape {:?}.",
            buffer.shape()
        )));
    }

    let read = element_reader(buffer.element_type(), FIELD)?;
    let n_nodes = buffer.n_rows();
    if n_nodes == 0 {
        return Ok(NeighborList::unweighted(0));
    }

    let weighted = !is_unweighted(buffer, read);
    debug!(n_nodes, weighted, element = buffer.element_type().as_str(), "dense adjacency classified");

    if weighted {
        fill_weighted(buffer, read, n_nodes, ctx)
    } else {
        fill_unweighted(buffer, read, n_nodes, ctx)
    }
}

fn fill_weighted(
    buffer: &StridedBuffer<'_>,
    read: ElementReader,
    n_nodes: usize,
    ctx: &mut RequestContext<'_>,
) -> Result<NeighborList> {
    let slot = ctx.finally.push("neighbor list (weighted)", NeighborList::weighted(n_nodes));

    for j in 0..n_nodes {
        ctx.check_interrupt()?;
        let neighs = ctx.finally.get_mut(&slot)?;
        let row = neighs
            .weight_row_mut(j)
            .ok_or_else(|| Se2Error::internal("weighted list lost its rows"))?;
        for (i, w) in row.iter_mut().enumerate() {
            *w = read(buffer.element_bytes(i, j));
        }
    }

    ctx.finally.take(slot)
}

fn fill_unweighted(
    buffer: &StridedBuffer<'_>,
    read: ElementReader,
    n_nodes: usize,
    ctx: &mut RequestContext<'_>,
) -> Result<NeighborList> {
    let slot = ctx.finally.push("neighbor list", NeighborList::unweighted(n_nodes));

    for j in 0..n_nodes {
        ctx.check_interrupt()?;

        // First pass sizes the list exactly, second pass fills it
        let count = (0..n_nodes)
            .filter(|&i| read(buffer.element_bytes(i, j)) > TOLERANCE)
            .count();

        let mut neighbors = Vec::with_capacity(count);
        for i in 0..n_nodes {
            if read(buffer.element_bytes(i, j)) > TOLERANCE {
                neighbors.push(i);
            }
        }

        ctx.finally.get_mut(&slot)?.set_neighbors(j, neighbors);
    }

    ctx.finally.take(slot)
}
