//! Python argument inspection
//!
//! - objects with `__array_interface__` (numpy and friends) → strided view
//! - objects shaped like `igraph.Graph` → [`EdgeListGraph`]

use pyo3::prelude::*;
use pyo3::types::PyDict;
use tracing::debug;

use crate::errors::{Result, Se2Error};
use crate::features::conversion::{AdjacencySource, EdgeListGraph, HostValue};
use crate::shared::models::{ElementType, StridedBuffer};

/// A Python graph argument after inspection
pub struct PyGraphValue<'py> {
    view: Option<StridedBuffer<'py>>,
    graph: Option<EdgeListGraph>,
}

impl<'py> PyGraphValue<'py> {
    pub fn inspect(obj: &'py PyAny, field: &str) -> PyResult<Self> {
        if let Some(view) = array_view(obj, field)? {
            return Ok(Self {
                view: Some(view),
                graph: None,
            });
        }
        Ok(Self {
            view: None,
            graph: igraph_edges(obj)?,
        })
    }
}

impl HostValue for PyGraphValue<'_> {
    fn strided_view(&self) -> Result<Option<StridedBuffer<'_>>> {
        Ok(self.view)
    }

    fn graph_object(&self) -> Option<&dyn AdjacencySource> {
        self.graph.as_ref().map(|g| g as &dyn AdjacencySource)
    }
}

fn required<'py>(iface: &'py PyDict, key: &str) -> PyResult<&'py PyAny> {
    iface
        .get_item(key)?
        .ok_or_else(|| PyErr::new::<pyo3::exceptions::PyKeyError, _>(format!("__array_interface__ lacks \"{}\"", key)))
}

/// Strided view over an object's `__array_interface__`, if it has one
pub fn array_view<'py>(obj: &'py PyAny, field: &str) -> PyResult<Option<StridedBuffer<'py>>> {
    if !obj.hasattr("__array_interface__")? {
        return Ok(None);
    }
    let iface: &PyDict = obj.getattr("__array_interface__")?.downcast()?;

    let shape: Vec<usize> = required(iface, "shape")?.extract()?;
    let typestr: String = required(iface, "typestr")?.extract()?;
    let element_type = ElementType::from_typestr(&typestr);
    let (ptr, _readonly): (usize, bool) = required(iface, "data")?.extract().map_err(|_| {
        PyErr::from(Se2Error::type_mismatch(format!(
            "\"{}\" must expose its data pointer through __array_interface__.",
            field
        )))
    })?;

    let item = element_type.size();
    let strides: Vec<isize> = match iface.get_item("strides")? {
        Some(s) if !s.is_none() => s.extract()?,
        _ => c_strides(&shape, item),
    };

    check_layout(field, &shape, &strides)?;

    let (lo, hi) = extent(&shape, &strides);
    let count: usize = shape.iter().product();
    let len = if count == 0 { 0 } else { (hi - lo) as usize + item };

    let bytes: &'py [u8] = if len == 0 || ptr == 0 {
        &[]
    } else {
        // SAFETY: the array interface promises `len` readable bytes starting
        // at the lowest addressed element. `obj` is borrowed for 'py, so the
        // owning array outlives the slice, and the GIL is held for the whole
        // request so Python code cannot resize or free it meanwhile.
        unsafe { std::slice::from_raw_parts((ptr as isize + lo) as *const u8, len) }
    };
    let offset = (-lo) as usize;

    let view = if shape.len() == 1 {
        StridedBuffer::new_1d(bytes, offset, shape[0], strides[0], element_type)?
    } else {
        StridedBuffer::new_2d(
            bytes,
            offset,
            [shape[0], shape[1]],
            [strides[0], strides[1]],
            element_type,
        )?
    };
    Ok(Some(view))
}

/// Dimensionality and stride count, checked before any pointer arithmetic
fn check_layout(field: &str, shape: &[usize], strides: &[isize]) -> Result<()> {
    if shape.is_empty() || shape.len() > 2 {
        return Err(Se2Error::shape(format!(
            "\"{}\" must be 1- or 2-dimensional, got {} dimensions.",
            field,
            shape.len()
        )));
    }
    if strides.len() != shape.len() {
        return Err(Se2Error::shape(format!(
            "\"{}\" has {} strides for {} dimensions.",
            field,
            strides.len(),
            shape.len()
        )));
    }
    Ok(())
}

fn c_strides(shape: &[usize], item: usize) -> Vec<isize> {
    let mut strides = vec![item as isize; shape.len()];
    for d in (0..shape.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * shape[d + 1] as isize;
    }
    strides
}

/// Byte offsets of the lowest and highest element relative to `[0, 0]`
fn extent(shape: &[usize], strides: &[isize]) -> (isize, isize) {
    let mut lo = 0isize;
    let mut hi = 0isize;
    for (&n, &s) in shape.iter().zip(strides) {
        if n == 0 {
            continue;
        }
        let span = s * (n as isize - 1);
        if span < 0 {
            lo += span;
        } else {
            hi += span;
        }
    }
    (lo, hi)
}

/// Pull node count, directedness, edges and numeric edge attributes out of
/// an igraph-like object
pub fn igraph_edges(obj: &PyAny) -> PyResult<Option<EdgeListGraph>> {
    for method in ["vcount", "is_directed", "get_edgelist"] {
        if !obj.hasattr(method)? {
            return Ok(None);
        }
    }

    let n_nodes: usize = obj.call_method0("vcount")?.extract()?;
    let directed: bool = obj.call_method0("is_directed")?.extract()?;
    let edges: Vec<(usize, usize)> = obj.call_method0("get_edgelist")?.extract()?;
    let mut graph = EdgeListGraph::new(n_nodes, edges, directed);

    if obj.hasattr("es")? {
        let es = obj.getattr("es")?;
        let names: Vec<String> = es.call_method0("attributes")?.extract()?;
        for name in names {
            match es.get_item(name.as_str())?.extract::<Vec<f64>>() {
                Ok(values) => graph = graph.with_attribute(name, values)?,
                Err(_) => debug!(attribute = %name, "non-numeric edge attribute skipped"),
            }
        }
    }
    Ok(Some(graph))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_strides() {
        assert_eq!(c_strides(&[3, 4], 8), vec![32, 8]);
        assert_eq!(c_strides(&[5], 4), vec![4]);
    }

    #[test]
    fn test_layout_checks() {
        use crate::errors::ErrorKind;

        assert!(check_layout("graph", &[2, 2], &[16, 8]).is_ok());
        assert!(check_layout("graph", &[4], &[8]).is_ok());

        let err = check_layout("graph", &[2, 2], &[16]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Shape);
        assert!(err.message.contains("1 strides for 2 dimensions"));

        let err = check_layout("graph", &[], &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Shape);
        assert!(check_layout("graph", &[2, 2, 2], &[32, 16, 8]).is_err());
    }

    #[test]
    fn test_extent_with_negative_stride() {
        // Reversed rows: a[::-1] of a 3x2 float64 array
        assert_eq!(extent(&[3, 2], &[-16, 8]), (-32, 8));
        assert_eq!(extent(&[0, 2], &[16, 8]), (0, 8));
    }
}
