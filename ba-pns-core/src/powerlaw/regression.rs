//! Least-squares fit of a log-binned histogram on log-log axes.
//!
//! Binned regression is biased for heavy tails and is kept as a visual
//! diagnostic only.

use crate::error::EstimationError;

/// Straight-line fit of `ln(density)` against `ln(x)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogLogFit {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Non-empty bins that took part in the fit.
    pub bins_used: usize,
}

impl LogLogFit {
    /// Exponent implied by the slope.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        -self.slope
    }
}

/// Bins the positive observations into `bins` logarithmically spaced bins
/// between their minimum and maximum, then regresses log density on the log
/// of each bin's geometric centre.
///
/// # Errors
/// Returns [`EstimationError::NonFiniteObservation`] for NaN or infinite
/// input, [`EstimationError::NoPositiveObservations`] when nothing positive
/// remains, and [`EstimationError::TooFewObservations`] when fewer than two
/// bins are populated.
///
/// # Examples
/// ```
/// use ba_pns_core::log_log_regression;
///
/// // Density halves each time x doubles: slope -1 on log-log axes.
/// let mut sample = Vec::new();
/// for (value, copies) in [(1.0, 64), (2.0, 32), (4.0, 16), (8.0, 8), (16.0, 4)] {
///     sample.extend(std::iter::repeat_n(value, copies));
/// }
/// let fit = log_log_regression(sample, 5)?;
/// assert!(fit.r_squared > 0.9);
/// assert!(fit.slope < 0.0);
/// # Ok::<(), ba_pns_core::EstimationError>(())
/// ```
pub fn log_log_regression<I>(observations: I, bins: usize) -> Result<LogLogFit, EstimationError>
where
    I: IntoIterator<Item = f64>,
{
    let values = super::positive_sorted(observations)?;
    let (Some(&low), Some(&high)) = (values.first(), values.last()) else {
        return Err(EstimationError::NoPositiveObservations);
    };
    if bins < 2 || low == high {
        return Err(EstimationError::TooFewObservations {
            got: usize::from(low != high),
            required: 2,
        });
    }

    let (log_low, log_high) = (low.ln(), high.ln());
    let step = (log_high - log_low) / bins as f64;
    let mut counts = vec![0_usize; bins];
    for value in &values {
        let offset = ((value.ln() - log_low) / step).floor();
        // The maximum lands exactly on the upper edge of the last bin.
        let bin = (offset.max(0.0) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    let total = values.len() as f64;
    let points: Vec<(f64, f64)> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(bin, &count)| {
            let left = log_low + step * bin as f64;
            let width = left.exp() * (step.exp() - 1.0);
            let density = count as f64 / (total * width);
            (left + step / 2.0, density.ln())
        })
        .collect();
    if points.len() < 2 {
        return Err(EstimationError::TooFewObservations {
            got: points.len(),
            required: 2,
        });
    }

    Ok(least_squares(&points))
}

fn least_squares(points: &[(f64, f64)]) -> LogLogFit {
    let n = points.len() as f64;
    let mean_x = points.iter().map(|&(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|&(_, y)| y).sum::<f64>() / n;
    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in points {
        let (dx, dy) = (x - mean_x, y - mean_y);
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    let slope = sxy / sxx;
    let r_squared = if syy > 0.0 {
        (sxy * sxy) / (sxx * syy)
    } else {
        1.0
    };
    LogLogFit {
        slope,
        intercept: mean_y - slope * mean_x,
        r_squared,
        bins_used: points.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_line_is_recovered() {
        let points = [(0.0, 1.0), (1.0, -1.0), (2.0, -3.0)];
        let fit = least_squares(&points);
        assert!((fit.slope + 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert!((fit.alpha() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn constant_sample_cannot_be_binned() {
        assert_eq!(
            log_log_regression([4.0; 20], 10),
            Err(EstimationError::TooFewObservations {
                got: 0,
                required: 2
            })
        );
    }

    #[test]
    fn single_bin_is_rejected() {
        assert!(matches!(
            log_log_regression([1.0, 2.0, 3.0], 1),
            Err(EstimationError::TooFewObservations { .. })
        ));
    }
}
