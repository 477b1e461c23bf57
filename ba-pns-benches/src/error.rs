//! Benchmark setup error type.
//!
//! Setup functions propagate failures with `?` instead of `.expect()`.

use ba_pns_core::{EstimationError, GrowthError};

use crate::source::SampleError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic sample generation failed.
    #[error("sample generation failed: {0}")]
    Sample(#[from] SampleError),
    /// Configuring or growing a network failed.
    #[error("network growth failed: {0}")]
    Growth(#[from] GrowthError),
    /// Fitting a power-law tail failed.
    #[error("exponent estimation failed: {0}")]
    Estimation(#[from] EstimationError),
}
