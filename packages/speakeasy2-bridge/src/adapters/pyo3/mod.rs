//! PyO3 adapter - Python bindings
//!
//! Modules:
//! - `host`: interpreter-backed [`HostSignals`](crate::features::signal::HostSignals)
//! - `input`: `__array_interface__` / igraph inspection
//! - `module`: `SpeakEasy2` pyclass and registration

pub mod host;
pub mod input;
pub mod module;

pub use host::PythonHost;
pub use input::{array_view, igraph_edges, PyGraphValue};
pub use module::{neighbor_list, register, PySpeakEasy2, WeightsArg};
