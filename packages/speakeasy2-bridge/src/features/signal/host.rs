//! Host-side signal sinks
//!
//! A host is whatever runtime drives the request: a plain Rust caller, or the
//! Python interpreter behind the `python` feature. It answers the bridge's
//! three questions: is a cancellation pending, where do warnings go, where do
//! status lines go.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

/// Host runtime capabilities the signal bridge relies on
pub trait HostSignals {
    /// True if the host has a pending cancellation request
    fn interrupted(&self) -> bool;

    /// Forward a non-fatal advisory
    fn warning(&self, message: &str);

    /// Write a progress line to the host's standard output
    fn status(&self, message: &str) -> io::Result<()>;
}

/// Status line for a host that has no standard output attached
pub(crate) fn log_status(message: &str) {
    info!(target: "speakeasy2", "{}", message.trim_end());
}

/// Cloneable cancellation flag shared between a request and whoever may
/// abort it (signal handler, UI thread, timeout)
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Plain Rust host: `CancelToken` for interruption, `tracing` for warnings,
/// a `Write` sink (stdout by default) for status lines. Without a sink,
/// status lines go to `tracing` at info level.
pub struct StdHost {
    cancel: CancelToken,
    out: Option<Mutex<Box<dyn Write + Send>>>,
}

impl StdHost {
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Route status lines to `out` instead of stdout
    pub fn with_output(out: Box<dyn Write + Send>) -> Self {
        Self {
            cancel: CancelToken::new(),
            out: Some(Mutex::new(out)),
        }
    }

    /// Host with no standard output (daemons, embedded runtimes)
    pub fn detached() -> Self {
        Self {
            cancel: CancelToken::new(),
            out: None,
        }
    }

    pub fn has_output(&self) -> bool {
        self.out.is_some()
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl Default for StdHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSignals for StdHost {
    fn interrupted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn warning(&self, message: &str) {
        warn!(target: "speakeasy2", "{}", message);
    }

    fn status(&self, message: &str) -> io::Result<()> {
        let Some(out) = &self.out else {
            log_status(message);
            return Ok(());
        };
        let mut out = out
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "status sink poisoned"))?;
        out.write_all(message.as_bytes())?;
        out.flush()
    }
}
