//! Numeric element adapter
//!
//! Resolves an [`ElementType`] once per buffer to a plain function that
//! widens one raw element to `f64`. No scaling, no per-element dispatch.

use crate::errors::{Result, Se2Error};
use crate::shared::models::{ElementType, RealMatrix, StridedBuffer};

/// Reads one native-endian element from the start of a byte slice
pub type ElementReader = fn(&[u8]) -> f64;

macro_rules! native_reader {
    ($name:ident, $ty:ty) => {
        #[inline]
        fn $name(raw: &[u8]) -> f64 {
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            buf.copy_from_slice(&raw[..std::mem::size_of::<$ty>()]);
            <$ty>::from_ne_bytes(buf) as f64
        }
    };
}

native_reader!(read_i8, i8);
native_reader!(read_i16, i16);
native_reader!(read_i32, i32);
native_reader!(read_i64, i64);
native_reader!(read_u8, u8);
native_reader!(read_u16, u16);
native_reader!(read_u32, u32);
native_reader!(read_u64, u64);
native_reader!(read_f32, f32);
native_reader!(read_f64, f64);

#[inline]
fn read_bool(raw: &[u8]) -> f64 {
    if raw[0] != 0 {
        1.0
    } else {
        0.0
    }
}

/// Resolve the reader for `element_type`.
///
/// `field` names the host argument in the error so the caller knows which
/// array to cast.
pub fn element_reader(element_type: ElementType, field: &str) -> Result<ElementReader> {
    let reader: ElementReader = match element_type {
        ElementType::Bool => read_bool,
        ElementType::Float32 => read_f32,
        ElementType::Float64 => read_f64,
        ElementType::Int8 => read_i8,
        ElementType::Int16 => read_i16,
        ElementType::Int32 => read_i32,
        ElementType::Int64 => read_i64,
        ElementType::UInt8 => read_u8,
        ElementType::UInt16 => read_u16,
        ElementType::UInt32 => read_u32,
        ElementType::UInt64 => read_u64,
        ElementType::Float16
        | ElementType::Complex64
        | ElementType::Complex128
        | ElementType::Other => {
            return Err(Se2Error::type_mismatch(format!(
                "Data type of \"{field}\" array ({}) is not handled. Please report or cast to \
                 another data type with \"{field}.astype\".",
                element_type.as_str()
            )));
        }
    };
    Ok(reader)
}

/// Copy a strided buffer into a real matrix of the same logical shape.
///
/// 1-D views become a single row.
pub fn to_real_matrix(buffer: &StridedBuffer<'_>, field: &str) -> Result<RealMatrix> {
    let read = element_reader(buffer.element_type(), field)?;

    let (n_rows, n_cols) = if buffer.ndim() == 1 {
        (1, buffer.n_rows())
    } else {
        (buffer.n_rows(), buffer.n_cols())
    };

    let mut mat = RealMatrix::zeros(n_rows, n_cols);
    if buffer.ndim() == 1 {
        for j in 0..n_cols {
            mat.set(0, j, read(buffer.element_bytes(j, 0)));
        }
    } else {
        for j in 0..n_cols {
            for i in 0..n_rows {
                mat.set(i, j, read(buffer.element_bytes(i, j)));
            }
        }
    }
    Ok(mat)
}
