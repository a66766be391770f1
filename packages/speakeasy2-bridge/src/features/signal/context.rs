//! Request-scoped context
//!
//! One [`RequestContext`] per public call. It carries the signal bridge the
//! engine talks to and the unwind stack the converters register resources
//! on. Nothing in it outlives the request.

use tracing::debug;

use super::bridge::{surface, EngineFault, EngineHooks, SignalBridge};
use super::host::HostSignals;
use crate::errors::{Result, Se2Error};
use crate::features::lifetime::UnwindStack;

pub struct RequestContext<'h> {
    operation: &'static str,
    bridge: SignalBridge<'h>,
    pub finally: UnwindStack,
}

impl<'h> RequestContext<'h> {
    pub fn new(operation: &'static str, host: &'h dyn HostSignals) -> Self {
        Self {
            operation,
            bridge: SignalBridge::new(host),
            finally: UnwindStack::new(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Hooks handed to the engine for the duration of one engine call
    pub fn hooks(&self) -> &dyn EngineHooks {
        &self.bridge
    }

    pub fn bridge(&self) -> &SignalBridge<'h> {
        &self.bridge
    }

    /// Fail with a cancellation error if the host asked to stop
    pub fn check_interrupt(&self) -> Result<()> {
        if self.bridge.check_interrupt() {
            return Err(Se2Error::cancelled(format!(
                "{} interrupted by host",
                self.operation
            )));
        }
        Ok(())
    }

    /// Turn an engine fault into a request error, unwinding first
    pub fn raise(&mut self, fault: EngineFault) -> Se2Error {
        self.fail(surface(fault))
    }

    /// Release everything still registered, then hand the error back
    pub fn fail(&mut self, err: Se2Error) -> Se2Error {
        let released = self.finally.unwind();
        debug!(
            op = self.operation,
            released,
            kind = err.kind.as_str(),
            "request failed, unwound resources"
        );
        err
    }

    /// Run `body` and unwind on failure.
    pub fn run<T>(&mut self, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        match body(self) {
            Ok(value) => {
                if !self.finally.is_empty() {
                    // Resources left registered on success are a bookkeeping bug
                    let leftover = self.finally.labels().join(", ");
                    return Err(self.fail(Se2Error::internal(format!(
                        "{} left resources registered: {}",
                        self.operation, leftover
                    ))));
                }
                debug!(
                    op = self.operation,
                    warnings = self.bridge.warning_count(),
                    "request complete"
                );
                Ok(value)
            }
            Err(err) => Err(self.fail(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::features::signal::host::StdHost;

    #[test]
    fn test_run_unwinds_on_failure() {
        let host = StdHost::new();
        let mut ctx = RequestContext::new("cluster", &host);

        let result: Result<()> = ctx.run(|ctx| {
            let _weights = ctx.finally.push("weights", vec![1.0f64]);
            let _list = ctx.finally.push("neighbor list", vec![vec![0usize]]);
            Err(Se2Error::value("boom"))
        });

        assert_eq!(result.unwrap_err().kind, ErrorKind::Value);
        assert!(ctx.finally.is_empty());
    }

    #[test]
    fn test_run_flags_leftover_registration() {
        let host = StdHost::new();
        let mut ctx = RequestContext::new("order_nodes", &host);

        let result = ctx.run(|ctx| {
            let _forgotten = ctx.finally.push("membership", 3u8);
            Ok(())
        });

        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(err.message.contains("membership"));
        assert!(ctx.finally.is_empty());
    }

    #[test]
    fn test_check_interrupt() {
        let host = StdHost::new();
        let ctx = RequestContext::new("knn_graph", &host);
        assert!(ctx.check_interrupt().is_ok());

        host.cancel_token().cancel();
        let err = ctx.check_interrupt().unwrap_err();
        assert!(err.is_cancelled());
        assert!(err.message.contains("knn_graph"));
    }

    #[test]
    fn test_raise_maps_and_unwinds() {
        let host = StdHost::new();
        let mut ctx = RequestContext::new("cluster", &host);
        let _slot = ctx.finally.push("neighbor list", ());

        let err = ctx.raise(EngineFault::interrupted("se2.c", 1));
        assert!(err.is_cancelled());
        assert!(ctx.finally.is_empty());
    }
}
