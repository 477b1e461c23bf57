//! Seeded power-law samples for estimator benchmarks.

use rand::{SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Pareto};

/// Errors raised while generating a sample.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum SampleError {
    /// The requested sample was empty.
    #[error("sample length must be greater than zero")]
    Empty,
    /// The exponent or cutoff cannot parameterise a Pareto law.
    #[error("invalid power law: alpha={alpha}, xmin={xmin}")]
    InvalidLaw {
        /// Requested exponent.
        alpha: f64,
        /// Requested lower cutoff.
        xmin: f64,
    },
}

/// Configuration of a synthetic power-law sample.
#[derive(Clone, Copy, Debug)]
pub struct SampleConfig {
    /// Number of observations.
    pub len: usize,
    /// Density exponent, which must exceed one.
    pub alpha: f64,
    /// Lower cutoff of the law.
    pub xmin: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Draws `config.len` observations with density `∝ x^-alpha` above `xmin`.
///
/// # Errors
/// Returns [`SampleError`] when the length is zero or the law is invalid.
///
/// # Examples
///
/// ```
/// use ba_pns_benches::source::{SampleConfig, pareto_sample};
///
/// let config = SampleConfig { len: 8, alpha: 2.5, xmin: 1.0, seed: 3 };
/// let sample = pareto_sample(&config).expect("valid config");
/// assert_eq!(sample.len(), 8);
/// assert!(sample.iter().all(|&x| x >= 1.0));
/// ```
pub fn pareto_sample(config: &SampleConfig) -> Result<Vec<f64>, SampleError> {
    if config.len == 0 {
        return Err(SampleError::Empty);
    }
    let law = Pareto::new(config.xmin, config.alpha - 1.0).map_err(|_| SampleError::InvalidLaw {
        alpha: config.alpha,
        xmin: config.xmin,
    })?;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    Ok((0..config.len).map(|_| law.sample(&mut rng)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn config(len: usize, alpha: f64, xmin: f64) -> SampleConfig {
        SampleConfig {
            len,
            alpha,
            xmin,
            seed: 42,
        }
    }

    #[rstest]
    #[case::empty(config(0, 2.5, 1.0), SampleError::Empty)]
    #[case::flat(config(4, 1.0, 1.0), SampleError::InvalidLaw { alpha: 1.0, xmin: 1.0 })]
    #[case::zero_cutoff(config(4, 2.5, 0.0), SampleError::InvalidLaw { alpha: 2.5, xmin: 0.0 })]
    fn rejects_invalid_configs(#[case] config: SampleConfig, #[case] expected: SampleError) {
        assert_eq!(pareto_sample(&config), Err(expected));
    }

    #[test]
    fn same_seed_same_sample() {
        let first = pareto_sample(&config(64, 2.2, 2.0)).expect("valid config");
        let second = pareto_sample(&config(64, 2.2, 2.0)).expect("valid config");
        assert_eq!(first, second);
    }
}
