//! Engine and host fixtures

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use speakeasy2_bridge::features::signal::CauseCode;
use speakeasy2_bridge::{
    AdjacencySource, AnalysisEngine, ClusterOptions, EdgeListGraph, EngineFault, EngineHooks,
    IntMatrix, KnnEdges, NeighborList, RealMatrix, Result,
};

/// What the fake engine should do when called
#[derive(Debug, Clone, Default)]
pub enum Script {
    /// Answer normally
    #[default]
    Succeed,
    /// Fail with this cause
    Fault(CauseCode),
    /// Emit a warning and a status line, then answer
    Chatty,
    /// Poll for interruption; fail with `Interrupted` if the host says so
    PollInterrupt,
}

/// Fake engine: records its inputs and answers deterministically.
///
/// - `cluster`: label = node index modulo 2, one row per subcluster level
/// - `knn_graph`: column `i` → columns `i+1..=i+k` (mod n)
/// - `order_nodes`: nodes sorted by label, ties by index
#[derive(Default)]
pub struct RecordingEngine {
    pub script: Script,
    pub lists: RefCell<Vec<NeighborList>>,
    pub options: RefCell<Vec<ClusterOptions>>,
    pub memberships: RefCell<Vec<IntMatrix>>,
    pub coords: RefCell<Vec<RealMatrix>>,
}

impl RecordingEngine {
    pub fn scripted(script: Script) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.lists.borrow().len() + self.coords.borrow().len()
    }

    fn play(&self, hooks: &dyn EngineHooks) -> std::result::Result<(), EngineFault> {
        match &self.script {
            Script::Succeed => Ok(()),
            Script::Fault(cause) => Err(EngineFault::new(*cause, "scripted failure", "se2_core.c", 101)),
            Script::Chatty => {
                hooks.warning("few nodes", "se2_seeding.c", 12);
                hooks.status("Running independent runs\n")
            }
            Script::PollInterrupt => {
                if hooks.check_interrupt() {
                    Err(EngineFault::interrupted("se2_core.c", 55))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl AnalysisEngine for RecordingEngine {
    fn cluster(
        &self,
        graph: &NeighborList,
        options: &ClusterOptions,
        hooks: &dyn EngineHooks,
    ) -> std::result::Result<IntMatrix, EngineFault> {
        self.lists.borrow_mut().push(graph.clone());
        self.options.borrow_mut().push(*options);
        self.play(hooks)?;

        let levels = options.subcluster.max(1) as usize;
        let mut memb = IntMatrix::zeros(levels, graph.n_nodes());
        for level in 0..levels {
            for node in 0..graph.n_nodes() {
                memb.set(level, node, (node % 2) as i64);
            }
        }
        Ok(memb)
    }

    fn knn_graph(
        &self,
        coords: &RealMatrix,
        k: usize,
        weighted: bool,
        hooks: &dyn EngineHooks,
    ) -> std::result::Result<KnnEdges, EngineFault> {
        self.coords.borrow_mut().push(coords.clone());
        self.play(hooks)?;

        let n = coords.n_cols();
        let mut edges = Vec::new();
        for i in 0..n {
            for d in 1..=k {
                edges.push((i, (i + d) % n));
            }
        }
        let weights: Vec<f64> = edges.iter().map(|&(_, d)| 1.0 / (1.0 + d as f64)).collect();
        let knn = KnnEdges::new(n, edges);
        Ok(if weighted { knn.with_weights(weights) } else { knn })
    }

    fn order_nodes(
        &self,
        graph: &NeighborList,
        membership: &IntMatrix,
        hooks: &dyn EngineHooks,
    ) -> std::result::Result<IntMatrix, EngineFault> {
        self.lists.borrow_mut().push(graph.clone());
        self.memberships.borrow_mut().push(membership.clone());
        self.play(hooks)?;

        let mut order = IntMatrix::zeros(membership.n_rows(), membership.n_cols());
        for (level, labels) in membership.rows().enumerate() {
            let mut nodes: Vec<usize> = (0..labels.len()).collect();
            nodes.sort_by_key(|&n| (labels[n], n));
            for (pos, node) in nodes.into_iter().enumerate() {
                order.set(level, pos, node as i64);
            }
        }
        Ok(order)
    }
}

/// Graph object wrapper that counts adjacency-routine calls
pub struct CountingGraph {
    pub inner: EdgeListGraph,
    pub calls: Cell<usize>,
}

impl CountingGraph {
    pub fn new(inner: EdgeListGraph) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }
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

    fn edge_attribute(&self, name: &str) -> Option<Vec<f64>> {
        self.inner.edge_attribute(name)
    }

    fn to_neighbor_list(&self, weights: Option<&[f64]>) -> Result<NeighborList> {
        self.calls.set(self.calls.get() + 1);
        self.inner.to_neighbor_list(weights)
    }
}

/// `Write` sink shared with the test body
#[derive(Clone, Default)]
pub struct SharedBuf(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink whose every write fails
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Two triangles joined by one edge
pub fn barbell() -> EdgeListGraph {
    EdgeListGraph::new(
        6,
        vec![(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
        false,
    )
}
