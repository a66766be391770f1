//! Error types for speakeasy2-bridge
//!
//! Every failure a request can end with is a [`Se2Error`] tagged with an
//! [`ErrorKind`]. Engine-reported failures arrive as
//! [`EngineFault`](crate::features::signal::EngineFault) and are classified by
//! the signal bridge; everything else is raised directly by the converters.

use std::fmt;
use thiserror::Error;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Shape/dimension mismatch (non-square matrix, wrong rank, ragged rows)
    Shape,
    /// Weight sequence length differs from the graph's edge count
    Cardinality,
    /// Unsupported element encoding or non-numeric sequence element
    Type,
    /// Argument value out of range
    Value,
    /// Named edge attribute missing on the graph
    Key,
    /// Engine ran out of memory
    OutOfMemory,
    /// Host requested cancellation
    Cancelled,
    /// Any other engine-reported failure
    Runtime,
    /// Bookkeeping bugs (unwind stack misuse)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Shape => "shape",
            ErrorKind::Cardinality => "cardinality",
            ErrorKind::Type => "type",
            ErrorKind::Value => "value",
            ErrorKind::Key => "key",
            ErrorKind::OutOfMemory => "out_of_memory",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Runtime => "runtime",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type
#[derive(Debug, Error)]
pub struct Se2Error {
    pub kind: ErrorKind,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Se2Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
            line: None,
            source: None,
        }
    }

    /// Attach the engine source location that raised the error
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn shape(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Shape, message)
    }

    pub fn cardinality(expected: usize, found: usize) -> Self {
        Self::new(
            ErrorKind::Cardinality,
            format!(
                "Number of weights ({}) does not match number of edges in graph ({}).",
                found, expected
            ),
        )
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    pub fn value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Value, message)
    }

    pub fn key(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Key, message)
    }

    pub fn out_of_memory(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfMemory, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ErrorKind::Cancelled
    }
}

impl fmt::Display for Se2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(ref file) = self.file {
            write!(f, " in {}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        Ok(())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Se2Error>;

// PyO3 integration (only when python feature is enabled)
#[cfg(feature = "python")]
impl From<Se2Error> for pyo3::PyErr {
    fn from(err: Se2Error) -> Self {
        use pyo3::exceptions::{
            PyKeyError, PyKeyboardInterrupt, PyMemoryError, PyRuntimeError, PyTypeError,
            PyValueError,
        };

        let msg = err.to_string();
        match err.kind {
            ErrorKind::Shape | ErrorKind::Cardinality | ErrorKind::Value => {
                PyErr::new::<PyValueError, _>(msg)
            }
            ErrorKind::Type => PyErr::new::<PyTypeError, _>(msg),
            ErrorKind::Key => PyErr::new::<PyKeyError, _>(msg),
            ErrorKind::OutOfMemory => PyErr::new::<PyMemoryError, _>(msg),
            ErrorKind::Cancelled => PyErr::new::<PyKeyboardInterrupt, _>(msg),
            ErrorKind::Runtime | ErrorKind::Internal => PyErr::new::<PyRuntimeError, _>(msg),
        }
    }
}

#[cfg(feature = "python")]
use pyo3::PyErr;

#[cfg(feature = "python")]
impl From<PyErr> for Se2Error {
    fn from(err: PyErr) -> Self {
        Se2Error::runtime(format!("Python error: {}", err))
    }
}
