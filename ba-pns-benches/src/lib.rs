//! Benchmark support crate for the payment network simulator.
//!
//! Provides seeded power-law samples and parameter types used by the
//! Criterion benchmarks for network growth and exponent estimation.

pub mod error;
pub mod params;
pub mod source;
