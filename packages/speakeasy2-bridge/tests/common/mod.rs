//! Common test utilities for speakeasy2-bridge
//!
//! Shared fixtures (engines, hosts) and builders (adjacency buffers).

#![allow(dead_code)]

mod builders;
mod fixtures;

// Re-export all utilities
pub use builders::*;
pub use fixtures::*;
