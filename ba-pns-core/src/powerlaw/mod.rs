//! Power-law tail exponent estimation.
//!
//! The exponent is the maximum-likelihood estimate over the tail above a
//! cutoff `xmin`. When the cutoff is not fixed it is chosen by minimising the
//! Kolmogorov–Smirnov distance between the empirical tail and the fitted
//! model, following Clauset, Shalizi & Newman (2009). Log-log regression of a
//! binned histogram is available as a diagnostic through
//! [`log_log_regression`]; it never feeds the reported exponent.

mod mle;
mod regression;

use tracing::{debug, instrument};

use crate::error::EstimationError;

pub use self::regression::{LogLogFit, log_log_regression};

/// Upper bound on the number of cutoffs evaluated by the automatic scan.
pub const MAX_XMIN_CANDIDATES: usize = 512;

/// Default minimum number of tail observations required for a fit.
pub const DEFAULT_MIN_TAIL: usize = 10;

/// Likelihood used for the tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TailModel {
    /// Density `∝ x^-alpha` for real `x >= xmin`.
    Continuous,
    /// Integer observations, using the `xmin - 1/2` approximation of the
    /// discrete likelihood.
    Discrete,
}

/// How the lower cutoff of the tail is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cutoff {
    /// Scan candidate cutoffs and keep the one with the smallest KS distance.
    Auto,
    /// Use the given cutoff.
    Fixed(f64),
}

/// Estimator parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatorConfig {
    model: TailModel,
    cutoff: Cutoff,
    min_tail: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            model: TailModel::Continuous,
            cutoff: Cutoff::Auto,
            min_tail: DEFAULT_MIN_TAIL,
        }
    }
}

impl EstimatorConfig {
    /// Creates the default configuration: continuous model, automatic cutoff.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the tail likelihood.
    #[must_use]
    pub fn with_model(mut self, model: TailModel) -> Self {
        self.model = model;
        self
    }

    /// Selects the cutoff strategy.
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: Cutoff) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Sets the minimum tail length; values below two are raised to two.
    #[must_use]
    pub fn with_min_tail(mut self, min_tail: usize) -> Self {
        self.min_tail = min_tail.max(2);
        self
    }

    /// Tail likelihood.
    #[must_use]
    pub fn model(&self) -> TailModel {
        self.model
    }

    /// Cutoff strategy.
    #[must_use]
    pub fn cutoff(&self) -> Cutoff {
        self.cutoff
    }

    /// Minimum tail length.
    #[must_use]
    pub fn min_tail(&self) -> usize {
        self.min_tail
    }
}

/// Result of a power-law fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerLawFit {
    /// Estimated exponent.
    pub alpha: f64,
    /// Lower cutoff of the fitted tail.
    pub xmin: f64,
    /// Observations at or above `xmin`.
    pub tail_len: usize,
    /// Positive observations considered.
    pub sample_len: usize,
    /// Asymptotic standard error `(alpha - 1) / sqrt(tail_len)`.
    pub std_error: f64,
    /// KS distance between the empirical tail and the fitted model.
    pub ks_distance: f64,
    /// Likelihood used.
    pub model: TailModel,
}

/// Maximum-likelihood power-law estimator.
///
/// # Examples
/// ```
/// use ba_pns_core::{Cutoff, EstimatorConfig, PowerLawEstimator};
///
/// let estimator = PowerLawEstimator::new(
///     EstimatorConfig::new().with_cutoff(Cutoff::Fixed(1.0)).with_min_tail(2),
/// );
/// let fit = estimator.fit([1.0, 2.0, 4.0, 8.0, 16.0])?;
/// assert_eq!(fit.xmin, 1.0);
/// assert_eq!(fit.tail_len, 5);
/// assert!(fit.alpha > 1.0);
/// # Ok::<(), ba_pns_core::EstimationError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PowerLawEstimator {
    config: EstimatorConfig,
}

impl PowerLawEstimator {
    /// Creates an estimator with the given parameters.
    #[must_use]
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Parameters of this estimator.
    #[must_use]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Fits the tail of `observations`.
    ///
    /// Zero and negative observations are dropped before fitting, as they lie
    /// outside the support of any power law.
    ///
    /// # Errors
    /// Returns [`EstimationError::NonFiniteObservation`] for NaN or infinite
    /// input, [`EstimationError::NoPositiveObservations`] when nothing
    /// remains, [`EstimationError::TooFewObservations`] when the tail is
    /// shorter than the configured minimum, [`EstimationError::Degenerate`]
    /// when the tail holds a single distinct value, and
    /// [`EstimationError::InvalidXmin`] for an unusable fixed cutoff.
    #[instrument(
        name = "powerlaw.fit",
        level = "debug",
        err,
        skip(self, observations),
        fields(model = ?self.config.model, cutoff = ?self.config.cutoff),
    )]
    pub fn fit<I>(&self, observations: I) -> Result<PowerLawFit, EstimationError>
    where
        I: IntoIterator<Item = f64>,
    {
        let sorted = positive_sorted(observations)?;
        let fit = match self.config.cutoff {
            Cutoff::Fixed(xmin) => {
                self.validate_xmin(xmin)?;
                mle::fit_fixed(&sorted, xmin, &self.config)?
            }
            Cutoff::Auto => mle::fit_auto(&sorted, &self.config)?,
        };
        debug!(
            alpha = fit.alpha,
            xmin = fit.xmin,
            tail_len = fit.tail_len,
            ks_distance = fit.ks_distance,
            "power-law tail fitted"
        );
        Ok(fit)
    }

    fn validate_xmin(&self, xmin: f64) -> Result<(), EstimationError> {
        if !xmin.is_finite() || xmin <= 0.0 {
            return Err(EstimationError::InvalidXmin {
                xmin,
                reason: "cutoff must be finite and positive",
            });
        }
        if self.config.model == TailModel::Discrete && xmin <= 0.5 {
            return Err(EstimationError::InvalidXmin {
                xmin,
                reason: "discrete cutoff must exceed one half",
            });
        }
        Ok(())
    }
}

/// Estimates the tail exponent of `observations` with the default
/// configuration (continuous likelihood, automatic cutoff).
///
/// # Errors
/// See [`PowerLawEstimator::fit`].
///
/// # Examples
/// ```
/// use ba_pns_core::{EstimationError, estimate_exponent};
///
/// let err = estimate_exponent([0.0, -1.0]).expect_err("nothing to fit");
/// assert_eq!(err, EstimationError::NoPositiveObservations);
/// ```
pub fn estimate_exponent<I>(observations: I) -> Result<PowerLawFit, EstimationError>
where
    I: IntoIterator<Item = f64>,
{
    PowerLawEstimator::default().fit(observations)
}

/// Converts a degree sequence into estimator input.
pub fn degree_observations(degrees: &[usize]) -> impl Iterator<Item = f64> + '_ {
    degrees.iter().map(|&degree| degree as f64)
}

fn positive_sorted<I>(observations: I) -> Result<Vec<f64>, EstimationError>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted = Vec::new();
    for (index, value) in observations.into_iter().enumerate() {
        if !value.is_finite() {
            return Err(EstimationError::NonFiniteObservation { index });
        }
        if value > 0.0 {
            sorted.push(value);
        }
    }
    if sorted.is_empty() {
        return Err(EstimationError::NoPositiveObservations);
    }
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

#[cfg(test)]
mod tests;
