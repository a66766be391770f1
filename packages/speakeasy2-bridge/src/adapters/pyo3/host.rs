//! Python interpreter as a signal host

use std::io;

use pyo3::exceptions::PyRuntimeWarning;
use pyo3::prelude::*;
use tracing::debug;

use crate::features::signal::host::log_status;
use crate::features::signal::HostSignals;

/// Signals routed through the running interpreter. Only valid while the GIL
/// is held, which the `Python<'py>` token guarantees.
pub struct PythonHost<'py> {
    py: Python<'py>,
}

impl<'py> PythonHost<'py> {
    pub fn new(py: Python<'py>) -> Self {
        Self { py }
    }
}

impl HostSignals for PythonHost<'_> {
    /// Runs pending signal handlers; a raised exception (Ctrl-C) counts as
    /// a cancellation request
    fn interrupted(&self) -> bool {
        self.py.check_signals().is_err()
    }

    fn warning(&self, message: &str) {
        let category = self.py.get_type::<PyRuntimeWarning>();
        if let Err(e) = PyErr::warn(self.py, category, message, 1) {
            // Warnings filter set to "error"
            debug!("RuntimeWarning not delivered: {}", e);
        }
    }

    /// `sys.stdout` is `None` under pythonw and some embedded interpreters;
    /// status lines then go to `tracing`
    fn status(&self, message: &str) -> io::Result<()> {
        let write = || -> PyResult<()> {
            let stdout = self.py.import("sys")?.getattr("stdout")?;
            if stdout.is_none() {
                log_status(message);
                return Ok(());
            }
            stdout.call_method1("write", (message,))?;
            Ok(())
        };
        write().map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }
}
