//! Tabular matrix adapters
//!
//! External nested sequences (`serde_json::Value` arrays) ↔ dense matrices.
//!
//! Encoding returns one inner sequence per row, except that a single-row
//! matrix comes back as the flat row itself. Decoding accepts both shapes:
//! if the first element is a sequence the input is row-major nested,
//! otherwise the whole input is one row.

use serde_json::Value;

use crate::errors::{Result, Se2Error};
use crate::shared::models::{DenseMatrix, IntMatrix};

// ═══════════════════════════════════════════════════════════════════════════
// Encode
// ═══════════════════════════════════════════════════════════════════════════

/// Matrix → nested sequence, flattening a single row
pub fn encode_matrix<T>(mat: &DenseMatrix<T>) -> Value
where
    T: Copy + Default + Into<Value>,
{
    let mut rows: Vec<Value> = mat
        .rows()
        .map(|row| Value::Array(row.iter().map(|&v| v.into()).collect()))
        .collect();

    if rows.len() == 1 {
        return rows.pop().unwrap_or(Value::Array(Vec::new()));
    }
    Value::Array(rows)
}


// ═══════════════════════════════════════════════════════════════════════════
// Decode
// ═══════════════════════════════════════════════════════════════════════════

fn coerce_real(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Integers stay exact; reals truncate toward zero
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::Bool(b) => Some(*b as i64),
        _ => None,
    }
}

fn decode_with<T>(value: &Value, field: &str, coerce: fn(&Value) -> Option<T>) -> Result<DenseMatrix<T>>
where
    T: Copy + Default,
{
    let outer = value
        .as_array()
        .ok_or_else(|| Se2Error::type_mismatch(format!("\"{}\" must be a sequence.", field)))?;

    if outer.is_empty() {
        return Ok(DenseMatrix::empty());
    }

    let element = |v: &Value, i: usize, j: usize| {
        coerce(v).ok_or_else(|| {
            Se2Error::type_mismatch(format!(
                "Element ({}, {}) of \"{}\" is not a real number: {}",
                i, j, field, v
            ))
        })
    };

    let Some(first) = outer[0].as_array() else {
        let mut mat = DenseMatrix::zeros(1, outer.len());
        for (j, v) in outer.iter().enumerate() {
            mat.set(0, j, element(v, 0, j)?);
        }
        return Ok(mat);
    };

    let n_cols = first.len();
    let mut mat = DenseMatrix::zeros(outer.len(), n_cols);
    for (i, row) in outer.iter().enumerate() {
        let row = row.as_array().ok_or_else(|| {
            Se2Error::type_mismatch(format!("Row {} of \"{}\" is not a sequence.", i, field))
        })?;
        if row.len() != n_cols {
            return Err(Se2Error::shape(format!(
                "Row {} of \"{}\" has {} entries, expected {}.",
                i,
                field,
                row.len(),
                n_cols
            )));
        }
        for (j, v) in row.iter().enumerate() {
            mat.set(i, j, element(v, i, j)?);
        }
    }
    Ok(mat)
}

/// Nested or flat sequence → integer matrix (membership labels)
pub fn decode_int_matrix(value: &Value, field: &str) -> Result<IntMatrix> {
    decode_with(value, field, coerce_int)
}

/// Flat sequence → reals (edge weights)
pub fn decode_sequence(value: &Value, field: &str) -> Result<Vec<f64>> {
    let items = value
        .as_array()
        .ok_or_else(|| Se2Error::type_mismatch(format!("\"{}\" must be a sequence.", field)))?;

    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            coerce_real(v).ok_or_else(|| {
                Se2Error::type_mismatch(format!(
                    "Element {} of \"{}\" is not a real number: {}",
                    i, field, v
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::shared::models::RealMatrix;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_encode_nested() {
        let mat = IntMatrix::from_rows(vec![vec![0, 0, 1], vec![2, 2, 3]]).unwrap();
        assert_eq!(encode_matrix(&mat), json!([[0, 0, 1], [2, 2, 3]]));
    }

    #[test]
    fn test_encode_single_row_flattens() {
        let mat = IntMatrix::row_vector(vec![1, 0, 1]);
        assert_eq!(encode_matrix(&mat), json!([1, 0, 1]));
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_matrix(&IntMatrix::empty()), json!([]));
    }

    #[test]
    fn test_decode_nested() {
        let mat = decode_int_matrix(&json!([[0, 1], [1, 1], [2, 0]]), "membership").unwrap();
        assert_eq!(mat.n_rows(), 3);
        assert_eq!(mat.n_cols(), 2);
        assert_eq!(mat.row(2), &[2, 0]);
    }

    #[test]
    fn test_decode_flat_is_single_row() {
        let mat = decode_int_matrix(&json!([3, 1, 2]), "membership").unwrap();
        assert_eq!(mat.n_rows(), 1);
        assert_eq!(mat.row(0), &[3, 1, 2]);
    }

    #[test]
    fn test_decode_empty_is_zero_by_zero() {
        let mat = decode_int_matrix(&json!([]), "membership").unwrap();
        assert_eq!((mat.n_rows(), mat.n_cols()), (0, 0));
    }

    #[test]
    fn test_decode_reports_row_and_column() {
        let err = decode_int_matrix(&json!([[0, 1], [1, "x"]]), "membership").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert!(err.message.contains("(1, 1)"));
        assert!(err.message.contains("membership"));
    }

    #[test]
    fn test_decode_ragged_rows() {
        let err = decode_int_matrix(&json!([[0, 1], [1]]), "membership").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Shape);
    }

    #[test]
    fn test_decode_nested_row_not_sequence() {
        let err = decode_int_matrix(&json!([[0, 1], 2]), "membership").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn test_decode_not_a_sequence() {
        let err = decode_int_matrix(&json!({"a": 1}), "membership").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn test_int_decode_truncates_reals_and_accepts_bools() {
        let mat = decode_int_matrix(&json!([1.9, -1.9, true]), "membership").unwrap();
        assert_eq!(mat.row(0), &[1, -1, 1]);
    }

    #[test]
    fn test_decode_sequence() {
        assert_eq!(decode_sequence(&json!([1, 0.5, false]), "weights").unwrap(), vec![1.0, 0.5, 0.0]);

        let err = decode_sequence(&json!([1, null]), "weights").unwrap_err();
        assert!(err.message.contains("Element 1"));
    }

    #[test]
    fn test_real_roundtrip() {
        let mat = RealMatrix::from_rows(vec![vec![0.5, 1.0], vec![2.0, -3.25]]).unwrap();
        let back = decode_with(&encode_matrix(&mat), "x", coerce_real).unwrap();
        assert_eq!(back, mat);
    }
}
