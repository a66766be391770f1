//! Error/signal bridge
//!
//! - `host`: what the host runtime provides (cancellation, warnings, stdout)
//! - `bridge`: engine callback channels and fault classification
//! - `context`: per-request context tying the bridge to the unwind stack

pub mod bridge;
pub mod context;
pub mod host;

pub use bridge::{surface, CauseCode, EngineFault, EngineHooks, SignalBridge};
pub use context::RequestContext;
pub use host::{CancelToken, HostSignals, StdHost};
