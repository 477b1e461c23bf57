//! Shared test utilities used across the ba-pns crates.

pub mod ci;
pub mod tracing;
