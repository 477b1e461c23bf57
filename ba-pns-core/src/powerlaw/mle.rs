//! Tail likelihood, KS distance and the `xmin` scan.

use crate::error::EstimationError;

use super::{EstimatorConfig, MAX_XMIN_CANDIDATES, PowerLawFit, TailModel};

impl TailModel {
    /// Reference point of the likelihood: `xmin` for continuous data and
    /// `xmin - 1/2` for the discrete approximation.
    fn base(self, xmin: f64) -> f64 {
        match self {
            Self::Continuous => xmin,
            Self::Discrete => xmin - 0.5,
        }
    }

    /// Model CDF of the tail at `x`.
    fn cdf(self, x: f64, xmin: f64, alpha: f64) -> f64 {
        let ratio = match self {
            Self::Continuous => x / xmin,
            Self::Discrete => (x + 0.5) / (xmin - 0.5),
        };
        1.0 - ratio.powf(1.0 - alpha)
    }

    fn accepts_cutoff(self, xmin: f64) -> bool {
        match self {
            Self::Continuous => xmin > 0.0,
            Self::Discrete => xmin > 0.5,
        }
    }
}

pub(super) fn fit_fixed(
    sorted: &[f64],
    xmin: f64,
    config: &EstimatorConfig,
) -> Result<PowerLawFit, EstimationError> {
    let start = sorted.partition_point(|&value| value < xmin);
    let tail = &sorted[start..];
    ensure_tail_len(tail.len(), config.min_tail())?;
    let log_sum = tail.iter().map(|value| value.ln()).sum();
    fit_tail(tail, xmin, log_sum, sorted.len(), config.model())
}

pub(super) fn fit_auto(
    sorted: &[f64],
    config: &EstimatorConfig,
) -> Result<PowerLawFit, EstimationError> {
    let total = sorted.len();
    ensure_tail_len(total, config.min_tail())?;

    // suffix[i] = sum of ln(x) over sorted[i..]
    let mut suffix = vec![0.0; total + 1];
    for (index, value) in sorted.iter().enumerate().rev() {
        suffix[index] = suffix[index + 1] + value.ln();
    }

    let model = config.model();
    let candidates: Vec<usize> = (0..=total - config.min_tail())
        .filter(|&index| index == 0 || sorted[index] != sorted[index - 1])
        .filter(|&index| model.accepts_cutoff(sorted[index]))
        .collect();
    if candidates.is_empty() {
        return Err(EstimationError::InvalidXmin {
            xmin: sorted[0],
            reason: "no observation exceeds one half",
        });
    }

    let mut best: Option<PowerLawFit> = None;
    for start in thin(&candidates, MAX_XMIN_CANDIDATES) {
        let xmin = sorted[start];
        let fit = match fit_tail(&sorted[start..], xmin, suffix[start], total, model) {
            Ok(fit) => fit,
            Err(EstimationError::Degenerate { .. }) => continue,
            Err(error) => return Err(error),
        };
        if best.is_none_or(|current| fit.ks_distance < current.ks_distance) {
            best = Some(fit);
        }
    }
    best.ok_or(EstimationError::Degenerate { xmin: sorted[0] })
}

fn ensure_tail_len(got: usize, required: usize) -> Result<(), EstimationError> {
    if got < required {
        return Err(EstimationError::TooFewObservations { got, required });
    }
    Ok(())
}

/// Evenly spaced subset of at most `limit` candidates, always keeping the
/// first and the last.
fn thin(candidates: &[usize], limit: usize) -> Vec<usize> {
    let len = candidates.len();
    if len <= limit || limit < 2 {
        return candidates.to_vec();
    }
    (0..limit)
        .map(|step| candidates[step * (len - 1) / (limit - 1)])
        .collect()
}

fn fit_tail(
    tail: &[f64],
    xmin: f64,
    log_sum: f64,
    sample_len: usize,
    model: TailModel,
) -> Result<PowerLawFit, EstimationError> {
    if tail.first() == tail.last() {
        return Err(EstimationError::Degenerate { xmin });
    }
    let n = tail.len() as f64;
    let spread = log_sum - n * model.base(xmin).ln();
    if spread.is_nan() || spread <= 0.0 {
        return Err(EstimationError::Degenerate { xmin });
    }

    let alpha = 1.0 + n / spread;
    Ok(PowerLawFit {
        alpha,
        xmin,
        tail_len: tail.len(),
        sample_len,
        std_error: (alpha - 1.0) / n.sqrt(),
        ks_distance: ks_distance(tail, xmin, alpha, model),
        model,
    })
}

/// Largest gap between the empirical tail CDF and the fitted model.
///
/// Continuous fits are compared on both sides of every jump of the empirical
/// CDF; discrete fits only at the observed values, where both CDFs are
/// defined.
fn ks_distance(tail: &[f64], xmin: f64, alpha: f64, model: TailModel) -> f64 {
    let n = tail.len() as f64;
    let mut below = 0_usize;
    let mut distance = 0.0_f64;
    for run in tail.chunk_by(|left, right| left == right) {
        let value = run[0];
        let at_or_below = below + run.len();
        let fitted = model.cdf(value, xmin, alpha);
        let mut gap = (at_or_below as f64 / n - fitted).abs();
        if model == TailModel::Continuous {
            gap = gap.max((below as f64 / n - fitted).abs());
        }
        distance = distance.max(gap);
        below = at_or_below;
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(10, 4, vec![0, 3, 6, 9])]
    #[case(3, 4, vec![0, 1, 2])]
    #[case(7, 2, vec![0, 6])]
    fn thin_spreads_candidates(
        #[case] len: usize,
        #[case] limit: usize,
        #[case] expected: Vec<usize>,
    ) {
        let candidates: Vec<usize> = (0..len).collect();
        assert_eq!(thin(&candidates, limit), expected);
    }

    #[test]
    fn closed_form_alpha_for_a_doubling_sample() {
        // ln-spread over xmin = 1 is ln 2 * (0 + 1 + 2 + 3) = 6 ln 2.
        let tail = [1.0, 2.0, 4.0, 8.0];
        let log_sum = tail.iter().map(|value: &f64| value.ln()).sum();
        let fit = fit_tail(&tail, 1.0, log_sum, 4, TailModel::Continuous)
            .expect("tail must fit");
        let expected = 1.0 + 4.0 / (6.0 * std::f64::consts::LN_2);
        assert!((fit.alpha - expected).abs() < 1e-12);
        assert!((fit.std_error - (expected - 1.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn ks_distance_takes_the_largest_jump_gap() {
        let tail = [1.0, 2.0];
        let distance = ks_distance(&tail, 1.0, 2.0, TailModel::Continuous);
        // F(1) = 0, F(2) = 0.5; empirical jumps are 0 -> 0.5 -> 1.
        assert!((distance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn discrete_cdf_uses_half_offsets() {
        let fitted = TailModel::Discrete.cdf(1.0, 1.0, 2.0);
        // 1 - (1.5 / 0.5)^-1 = 2/3
        assert!((fitted - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_valued_tail_is_degenerate() {
        let tail = [3.0; 12];
        let log_sum = 12.0 * 3.0_f64.ln();
        assert_eq!(
            fit_tail(&tail, 3.0, log_sum, 12, TailModel::Discrete),
            Err(EstimationError::Degenerate { xmin: 3.0 })
        );
    }
}
