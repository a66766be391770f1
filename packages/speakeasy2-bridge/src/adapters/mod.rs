//! Inbound adapters - host runtimes driving the bridge
//!
//! Currently: PyO3 (Python bindings)

#[cfg(feature = "python")]
pub mod pyo3;
