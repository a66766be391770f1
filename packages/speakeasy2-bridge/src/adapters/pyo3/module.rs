//! `PySpeakEasy2`: the engine exposed as `cluster` / `knn_graph` /
//! `order_nodes`
//!
//! ```python
//! import speakeasy2 as se2
//! memb = se2.cluster(g, seed=7, subcluster=2)
//! order = se2.order_nodes(g, memb)
//! g_knn, weights = se2.knn_graph(cols, 10, is_weighted=True)
//! ```
//!
//! The GIL stays held for the whole call: the engine polls the interpreter
//! for Ctrl-C and writes status lines to `sys.stdout`.

use std::sync::Arc;

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyModule};
use serde_json::Value;

use super::host::PythonHost;
use super::input::{array_view, PyGraphValue};
use crate::api::{self, AnalysisEngine, Weights, DEFAULT_WEIGHT_ATTRIBUTE};
use crate::config::ClusterOptions;
use crate::errors::Se2Error;
use crate::features::conversion::GraphInput;

/// `weights=` as passed from Python
#[derive(FromPyObject)]
pub enum WeightsArg<'py> {
    /// Edge attribute name
    Name(String),
    /// Any sequence of numbers
    Sequence(&'py PyAny),
}

impl WeightsArg<'_> {
    fn default_attribute() -> Option<Self> {
        Some(WeightsArg::Name(DEFAULT_WEIGHT_ATTRIBUTE.to_string()))
    }
}

/// Decoded `weights=`; owns the data a [`Weights`] borrows
enum OwnedWeights {
    Name(String),
    Sequence(Value),
}

impl OwnedWeights {
    fn from_arg(arg: Option<WeightsArg<'_>>) -> PyResult<Option<Self>> {
        arg.map(|arg| match arg {
            WeightsArg::Name(name) => Ok(OwnedWeights::Name(name)),
            WeightsArg::Sequence(seq) => depythonize_value(seq, "weights").map(OwnedWeights::Sequence),
        })
        .transpose()
    }

    fn as_weights(&self) -> Weights<'_> {
        match self {
            OwnedWeights::Name(name) => Weights::Attribute(name),
            OwnedWeights::Sequence(value) => Weights::External(value),
        }
    }
}

fn depythonize_value(obj: &PyAny, field: &str) -> PyResult<Value> {
    pythonize::depythonize(obj).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyTypeError, _>(format!("Invalid \"{}\": {}", field, e))
    })
}

fn pythonize_value(py: Python, value: &Value) -> PyResult<PyObject> {
    pythonize::pythonize(py, value).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Pythonization failed: {}", e))
    })
}

#[pyclass(name = "SpeakEasy2")]
pub struct PySpeakEasy2 {
    engine: Arc<dyn AnalysisEngine + Send + Sync>,
}

impl PySpeakEasy2 {
    pub fn new(engine: Arc<dyn AnalysisEngine + Send + Sync>) -> Self {
        Self { engine }
    }
}

#[pymethods]
impl PySpeakEasy2 {
    /// Cluster a graph (igraph.Graph or adjacency ndarray).
    ///
    /// Integer options left at 0 are chosen by the engine.
    #[pyo3(signature = (
        graph,
        weights = WeightsArg::default_attribute(),
        discard_transient = 0,
        independent_runs = 0,
        max_threads = 0,
        seed = 0,
        target_clusters = 0,
        target_partitions = 0,
        subcluster = 0,
        min_cluster = 0,
        verbose = false
    ))]
    #[allow(clippy::too_many_arguments)]
    fn cluster(
        &self,
        py: Python,
        graph: &PyAny,
        weights: Option<WeightsArg<'_>>,
        discard_transient: u32,
        independent_runs: u32,
        max_threads: u32,
        seed: u32,
        target_clusters: u32,
        target_partitions: u32,
        subcluster: u32,
        min_cluster: u32,
        verbose: bool,
    ) -> PyResult<PyObject> {
        let options = ClusterOptions::default()
            .discard_transient(discard_transient)
            .independent_runs(independent_runs)
            .max_threads(max_threads)
            .random_seed(seed)
            .target_clusters(target_clusters)
            .target_partitions(target_partitions)
            .subcluster(subcluster)
            .min_cluster(min_cluster)
            .verbose(verbose);

        let value = PyGraphValue::inspect(graph, "graph")?;
        let input = GraphInput::inspect(&value)?;
        let weights = OwnedWeights::from_arg(weights)?;

        let host = PythonHost::new(py);
        let memb = api::cluster(
            self.engine.as_ref(),
            &host,
            input,
            weights.as_ref().map(OwnedWeights::as_weights),
            &options,
        )?;
        pythonize_value(py, &memb)
    }

    /// k-nearest-neighbor graph between the columns of a 2-D array.
    ///
    /// Returns `(igraph.Graph, weights)`; `weights` is empty unless
    /// `is_weighted`.
    #[pyo3(signature = (cols, k, is_weighted = false))]
    fn knn_graph(&self, py: Python, cols: &PyAny, k: usize, is_weighted: bool) -> PyResult<PyObject> {
        let view = array_view(cols, "cols")?.ok_or_else(|| {
            PyErr::from(Se2Error::type_mismatch("Cols must be an array."))
        })?;

        let host = PythonHost::new(py);
        let (graph, weights) = api::knn_graph(self.engine.as_ref(), &host, &view, k, is_weighted)?;

        let edges: Vec<(usize, usize)> = graph
            .raw_edges()
            .iter()
            .map(|e| (e.source().index(), e.target().index()))
            .collect();

        let kwargs = PyDict::new(py);
        kwargs.set_item("directed", true)?;
        let ig_graph = py
            .import("igraph")?
            .getattr("Graph")?
            .call((graph.node_count(), edges), Some(kwargs))?;
        if is_weighted {
            ig_graph.getattr("es")?.set_item("weight", weights.clone())?;
        }

        Ok((ig_graph, weights).into_py(py))
    }

    /// Order nodes so communities are contiguous; same shape as
    /// `membership`
    #[pyo3(signature = (graph, membership, weights = WeightsArg::default_attribute()))]
    fn order_nodes(
        &self,
        py: Python,
        graph: &PyAny,
        membership: &PyAny,
        weights: Option<WeightsArg<'_>>,
    ) -> PyResult<PyObject> {
        let value = PyGraphValue::inspect(graph, "graph")?;
        let input = GraphInput::inspect(&value)?;
        let membership = depythonize_value(membership, "membership")?;
        let weights = OwnedWeights::from_arg(weights)?;

        let host = PythonHost::new(py);
        let order = api::order_nodes(
            self.engine.as_ref(),
            &host,
            input,
            &membership,
            weights.as_ref().map(OwnedWeights::as_weights),
        )?;
        pythonize_value(py, &order)
    }
}

/// Canonical neighbor list the engine would receive for `graph`, as a dict
#[pyfunction]
#[pyo3(signature = (graph, weights = WeightsArg::default_attribute()))]
pub fn neighbor_list(py: Python, graph: &PyAny, weights: Option<WeightsArg<'_>>) -> PyResult<PyObject> {
    let value = PyGraphValue::inspect(graph, "graph")?;
    let input = GraphInput::inspect(&value)?;
    let weights = OwnedWeights::from_arg(weights)?;

    let host = PythonHost::new(py);
    let list = api::neighbor_list(&host, input, weights.as_ref().map(OwnedWeights::as_weights))?;

    pythonize::pythonize(py, &list).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Pythonization failed: {}", e))
    })
}

/// Add the `SpeakEasy2` class plus module-level `cluster`, `knn_graph` and
/// `order_nodes` bound to `engine`
pub fn register(
    py: Python,
    m: &PyModule,
    engine: Arc<dyn AnalysisEngine + Send + Sync>,
) -> PyResult<()> {
    m.add_class::<PySpeakEasy2>()?;

    let instance = Py::new(py, PySpeakEasy2::new(engine))?;
    for name in ["cluster", "knn_graph", "order_nodes"] {
        m.add(name, instance.getattr(py, name)?)?;
    }
    Ok(())
}
