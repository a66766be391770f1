//! Strided numeric buffer view
//!
//! A read-only 1-D or 2-D window over external memory. Elements are located by
//! per-dimension byte strides from a base offset, so transposed, sliced and
//! negatively-strided host arrays are readable without copying.

use crate::errors::{Result, Se2Error};

// ═══════════════════════════════════════════════════════════════════════════
// Element Types
// ═══════════════════════════════════════════════════════════════════════════

/// Runtime element encoding tag of an external buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float16,
    Float32,
    Float64,
    Complex64,
    Complex128,
    /// Anything else the host can describe (objects, strings, records,
    /// foreign byte order)
    Other,
}

impl ElementType {
    /// Size of one element in bytes (0 for `Other`)
    pub fn size(&self) -> usize {
        match self {
            ElementType::Bool | ElementType::Int8 | ElementType::UInt8 => 1,
            ElementType::Int16 | ElementType::UInt16 | ElementType::Float16 => 2,
            ElementType::Int32 | ElementType::UInt32 | ElementType::Float32 => 4,
            ElementType::Int64 | ElementType::UInt64 | ElementType::Float64 => 8,
            ElementType::Complex64 => 8,
            ElementType::Complex128 => 16,
            ElementType::Other => 0,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ElementType::Int8
                | ElementType::Int16
                | ElementType::Int32
                | ElementType::Int64
                | ElementType::UInt8
                | ElementType::UInt16
                | ElementType::UInt32
                | ElementType::UInt64
        )
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, ElementType::Complex64 | ElementType::Complex128)
    }

    /// Numeric in the host's sense: booleans, integers, reals and complex
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ElementType::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Bool => "bool",
            ElementType::Int8 => "int8",
            ElementType::Int16 => "int16",
            ElementType::Int32 => "int32",
            ElementType::Int64 => "int64",
            ElementType::UInt8 => "uint8",
            ElementType::UInt16 => "uint16",
            ElementType::UInt32 => "uint32",
            ElementType::UInt64 => "uint64",
            ElementType::Float16 => "float16",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
            ElementType::Complex64 => "complex64",
            ElementType::Complex128 => "complex128",
            ElementType::Other => "other",
        }
    }

    /// Parse an array-interface type string such as `"<f8"`, `"|b1"`, `"<i4"`.
    ///
    /// Strings in the non-native byte order map to `Other` so they are
    /// rejected with a cast hint rather than misread.
    pub fn from_typestr(typestr: &str) -> Self {
        let mut chars = typestr.chars();
        let order = chars.next();
        let native = match order {
            Some('|') | Some('=') => true,
            Some('<') => cfg!(target_endian = "little"),
            Some('>') => cfg!(target_endian = "big"),
            _ => false,
        };
        let kind = chars.next();
        let size: usize = match chars.as_str().parse() {
            Ok(size) => size,
            Err(_) => return ElementType::Other,
        };

        let ty = match (kind, size) {
            (Some('b'), 1) => ElementType::Bool,
            (Some('i'), 1) => ElementType::Int8,
            (Some('i'), 2) => ElementType::Int16,
            (Some('i'), 4) => ElementType::Int32,
            (Some('i'), 8) => ElementType::Int64,
            (Some('u'), 1) => ElementType::UInt8,
            (Some('u'), 2) => ElementType::UInt16,
            (Some('u'), 4) => ElementType::UInt32,
            (Some('u'), 8) => ElementType::UInt64,
            (Some('f'), 2) => ElementType::Float16,
            (Some('f'), 4) => ElementType::Float32,
            (Some('f'), 8) => ElementType::Float64,
            (Some('c'), 8) => ElementType::Complex64,
            (Some('c'), 16) => ElementType::Complex128,
            _ => ElementType::Other,
        };

        if native || ty.size() == 1 {
            ty
        } else {
            ElementType::Other
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Strided Buffer
// ═══════════════════════════════════════════════════════════════════════════

/// Read-only strided view over external numeric memory
#[derive(Debug, Clone, Copy)]
pub struct StridedBuffer<'a> {
    bytes: &'a [u8],
    offset: usize,
    shape: [usize; 2],
    strides: [isize; 2],
    ndim: usize,
    element_type: ElementType,
}

impl<'a> StridedBuffer<'a> {
    /// 2-D view. `offset` is the byte position of element `[0, 0]` inside
    /// `bytes`; every addressable element must lie inside `bytes`.
    pub fn new_2d(
        bytes: &'a [u8],
        offset: usize,
        shape: [usize; 2],
        strides: [isize; 2],
        element_type: ElementType,
    ) -> Result<Self> {
        let view = Self {
            bytes,
            offset,
            shape,
            strides,
            ndim: 2,
            element_type,
        };
        view.check_extent()?;
        Ok(view)
    }

    /// 1-D view of `len` elements
    pub fn new_1d(
        bytes: &'a [u8],
        offset: usize,
        len: usize,
        stride: isize,
        element_type: ElementType,
    ) -> Result<Self> {
        let view = Self {
            bytes,
            offset,
            shape: [len, 1],
            strides: [stride, 0],
            ndim: 1,
            element_type,
        };
        view.check_extent()?;
        Ok(view)
    }

    /// Row-major contiguous 2-D view over the whole slice
    pub fn contiguous(
        bytes: &'a [u8],
        n_rows: usize,
        n_cols: usize,
        element_type: ElementType,
    ) -> Result<Self> {
        let item = element_type.size() as isize;
        Self::new_2d(
            bytes,
            0,
            [n_rows, n_cols],
            [item * n_cols as isize, item],
            element_type,
        )
    }

    fn check_extent(&self) -> Result<()> {
        let count = if self.ndim == 1 {
            self.shape[0]
        } else {
            self.shape[0] * self.shape[1]
        };
        if count == 0 {
            return Ok(());
        }

        let item = self.element_type.size();
        let mut lo = self.offset as isize;
        let mut hi = self.offset as isize;
        for dim in 0..self.ndim {
            let span = self.strides[dim] * (self.shape[dim] as isize - 1);
            if span < 0 {
                lo += span;
            } else {
                hi += span;
            }
        }

        if lo < 0 || (hi as usize) + item > self.bytes.len() {
            return Err(Se2Error::shape(format!(
                "Strided view with shape {:?} and strides {:?} exceeds its {} byte buffer.",
                self.shape(),
                &self.strides[..self.ndim],
                self.bytes.len()
            )));
        }
        Ok(())
    }

    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Shape as `[rows, cols]`; 1-D views report `[len]`
    pub fn shape(&self) -> &[usize] {
        &self.shape[..self.ndim]
    }

    pub fn n_rows(&self) -> usize {
        self.shape[0]
    }

    pub fn n_cols(&self) -> usize {
        self.shape[1]
    }

    pub fn row_stride(&self) -> isize {
        self.strides[0]
    }

    pub fn col_stride(&self) -> isize {
        self.strides[1]
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn is_square(&self) -> bool {
        self.ndim == 2 && self.shape[0] == self.shape[1]
    }

    /// Raw bytes of element `[i, j]` (`j` is ignored for 1-D views).
    ///
    /// Indices are trusted: callers iterate within `shape`, which
    /// `check_extent` proved addressable.
    #[inline]
    pub fn element_bytes(&self, i: usize, j: usize) -> &'a [u8] {
        let at = self.offset as isize + self.strides[0] * i as isize + self.strides[1] * j as isize;
        let at = at as usize;
        &self.bytes[at..at + self.element_type.size()]
    }
}
