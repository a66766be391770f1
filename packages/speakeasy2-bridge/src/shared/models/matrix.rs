//! Dense result matrices
//!
//! Row-major grids used for membership assignments, node orderings and knn
//! input coordinates.

use serde::{Deserialize, Serialize};

/// Dense row-major matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDenseMatrix<T>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct DenseMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    data: Vec<T>,
}

/// Wire shape, checked before it becomes a [`DenseMatrix`]
#[derive(Deserialize)]
struct RawDenseMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    data: Vec<T>,
}

impl<T> TryFrom<RawDenseMatrix<T>> for DenseMatrix<T> {
    type Error = String;

    fn try_from(raw: RawDenseMatrix<T>) -> std::result::Result<Self, Self::Error> {
        let expected = raw.n_rows.checked_mul(raw.n_cols);
        if expected != Some(raw.data.len()) {
            return Err(format!(
                "matrix of shape {}x{} cannot hold {} entries",
                raw.n_rows,
                raw.n_cols,
                raw.data.len()
            ));
        }
        Ok(Self {
            n_rows: raw.n_rows,
            n_cols: raw.n_cols,
            data: raw.data,
        })
    }
}

/// Integer matrix (membership labels, node orderings)
pub type IntMatrix = DenseMatrix<i64>;

/// Real matrix (coordinates)
pub type RealMatrix = DenseMatrix<f64>;

impl<T: Copy + Default> DenseMatrix<T> {
    /// Zero-filled matrix
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![T::default(); n_rows * n_cols],
        }
    }

    /// Build from row vectors. Returns `None` when rows differ in length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != n_cols) {
            return None;
        }
        Some(Self {
            n_rows,
            n_cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Single-row matrix
    pub fn row_vector(values: Vec<T>) -> Self {
        Self {
            n_rows: 1,
            n_cols: values.len(),
            data: values,
        }
    }

    pub fn empty() -> Self {
        Self::zeros(0, 0)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.n_cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.data[i * self.n_cols + j] = value;
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks() panics on 0; an n x 0 matrix still has n (empty) rows
        (0..self.n_rows).map(move |i| self.row(i))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
