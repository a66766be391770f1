//! Test data builders

use speakeasy2_bridge::shared::models::ElementType;
use speakeasy2_bridge::StridedBuffer;

/// Owned row-major matrix bytes that hand out strided views
#[derive(Debug, Clone)]
pub struct MatrixBytes {
    pub bytes: Vec<u8>,
    pub n_rows: usize,
    pub n_cols: usize,
    pub element_type: ElementType,
}

impl MatrixBytes {
    pub fn f64(rows: &[Vec<f64>]) -> Self {
        Self::encode(rows, ElementType::Float64, |v| v.to_ne_bytes().to_vec())
    }

    pub fn f32(rows: &[Vec<f64>]) -> Self {
        Self::encode(rows, ElementType::Float32, |v| (v as f32).to_ne_bytes().to_vec())
    }

    pub fn i32(rows: &[Vec<f64>]) -> Self {
        Self::encode(rows, ElementType::Int32, |v| (v as i32).to_ne_bytes().to_vec())
    }

    pub fn bool(rows: &[Vec<f64>]) -> Self {
        Self::encode(rows, ElementType::Bool, |v| vec![(v != 0.0) as u8])
    }

    fn encode(rows: &[Vec<f64>], element_type: ElementType, enc: impl Fn(f64) -> Vec<u8>) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let bytes = rows.iter().flatten().flat_map(|&v| enc(v)).collect();
        Self {
            bytes,
            n_rows,
            n_cols,
            element_type,
        }
    }

    pub fn view(&self) -> StridedBuffer<'_> {
        StridedBuffer::contiguous(&self.bytes, self.n_rows, self.n_cols, self.element_type)
            .expect("builder produces consistent extents")
    }

    /// Column-major (transposed storage) view of the same logical matrix
    pub fn fortran_view(&self) -> (Vec<u8>, [isize; 2]) {
        let item = self.element_type.size();
        let mut out = vec![0u8; self.bytes.len()];
        for i in 0..self.n_rows {
            for j in 0..self.n_cols {
                let src = (i * self.n_cols + j) * item;
                let dst = (j * self.n_rows + i) * item;
                out[dst..dst + item].copy_from_slice(&self.bytes[src..src + item]);
            }
        }
        (out, [item as isize, (item * self.n_rows) as isize])
    }
}

/// Adjacency matrix of an undirected graph given as edges
pub fn symmetric_adjacency(n: usize, edges: &[(usize, usize)], w: f64) -> Vec<Vec<f64>> {
    let mut rows = vec![vec![0.0; n]; n];
    for &(a, b) in edges {
        rows[a][b] = w;
        rows[b][a] = w;
    }
    rows
}

/// Complete graph on `n` nodes without self-loops
pub fn complete_adjacency(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
        .collect()
}
