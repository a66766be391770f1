//! Vertical slices of the conversion layer

pub mod conversion;
pub mod element;
pub mod lifetime;
pub mod signal;
pub mod tabular;
