//! Error/signal bridge between the analysis engine and the host
//!
//! The engine reports through four channels: hard error, warning, status
//! message, interruption poll. [`SignalBridge`] is the request-scoped
//! implementation of those channels; it is created per call and borrowed by
//! the engine, never installed globally.

use std::cell::Cell;

use tracing::debug;

use super::host::HostSignals;
use crate::errors::Se2Error;

// ═══════════════════════════════════════════════════════════════════════════
// Engine Faults
// ═══════════════════════════════════════════════════════════════════════════

/// Machine-readable cause attached to an engine hard error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseCode {
    Failure,
    OutOfMemory,
    InvalidValue,
    Interrupted,
    /// Engine-specific code without a dedicated mapping
    Other(i32),
}

impl CauseCode {
    /// Human-readable cause, prefixed to the engine's reason
    pub fn describe(&self) -> String {
        match self {
            CauseCode::Failure => "Failed".to_string(),
            CauseCode::OutOfMemory => "Not enough memory".to_string(),
            CauseCode::InvalidValue => "Invalid value".to_string(),
            CauseCode::Interrupted => "Interrupted".to_string(),
            CauseCode::Other(code) => format!("Engine error {}", code),
        }
    }
}

/// Hard error raised by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineFault {
    pub cause: CauseCode,
    pub reason: String,
    pub file: String,
    pub line: u32,
}

impl EngineFault {
    pub fn new(cause: CauseCode, reason: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            cause,
            reason: reason.into(),
            file: file.into(),
            line,
        }
    }

    pub fn interrupted(file: impl Into<String>, line: u32) -> Self {
        Self::new(CauseCode::Interrupted, "Interrupted by host", file, line)
    }
}

/// Classify an engine fault into the crate's error taxonomy
pub fn surface(fault: EngineFault) -> Se2Error {
    let message = format!("{}: {}", fault.cause.describe(), fault.reason);
    let err = match fault.cause {
        CauseCode::OutOfMemory => Se2Error::out_of_memory(message),
        CauseCode::Interrupted => Se2Error::cancelled(message),
        CauseCode::Failure | CauseCode::InvalidValue | CauseCode::Other(_) => {
            Se2Error::runtime(message)
        }
    };
    err.with_location(fault.file, fault.line)
}

// ═══════════════════════════════════════════════════════════════════════════
// Engine Hooks
// ═══════════════════════════════════════════════════════════════════════════

/// Callback channels the engine may use while it runs
pub trait EngineHooks {
    /// Polled periodically; the engine aborts cooperatively when true
    fn check_interrupt(&self) -> bool;

    /// Advisory; never aborts the call
    fn warning(&self, reason: &str, file: &str, line: u32);

    /// Progress line; a failed write is a hard error
    fn status(&self, message: &str) -> Result<(), EngineFault>;
}

/// Request-scoped bridge from engine callbacks to a host
pub struct SignalBridge<'h> {
    host: &'h dyn HostSignals,
    warnings: Cell<usize>,
}

impl<'h> SignalBridge<'h> {
    pub fn new(host: &'h dyn HostSignals) -> Self {
        Self {
            host,
            warnings: Cell::new(0),
        }
    }

    /// Warnings forwarded so far in this request
    pub fn warning_count(&self) -> usize {
        self.warnings.get()
    }
}

impl EngineHooks for SignalBridge<'_> {
    fn check_interrupt(&self) -> bool {
        self.host.interrupted()
    }

    fn warning(&self, reason: &str, file: &str, line: u32) {
        self.warnings.set(self.warnings.get() + 1);
        let msg = format!("{}\n\n> In {} (line {})\n", reason, file, line);
        self.host.warning(&msg);
    }

    fn status(&self, message: &str) -> Result<(), EngineFault> {
        self.host.status(message).map_err(|e| {
            debug!("status write failed: {}", e);
            EngineFault::new(
                CauseCode::Failure,
                format!("Could not write status message: {}", e),
                file!(),
                line!(),
            )
        })
    }
}
