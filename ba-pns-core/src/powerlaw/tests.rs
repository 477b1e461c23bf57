//! Estimator tests against synthetic power-law samples.

use proptest::{collection::vec, prop_assert, prop_assert_eq, proptest};
use rand::{SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Pareto};
use rstest::rstest;

use super::*;

const SAMPLE: usize = 20_000;

/// Continuous power law with density `∝ x^-alpha` above `xmin`.
fn continuous_sample(alpha: f64, xmin: f64, seed: u64) -> Vec<f64> {
    let pareto = Pareto::new(xmin, alpha - 1.0).expect("pareto parameters must be valid");
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..SAMPLE).map(|_| pareto.sample(&mut rng)).collect()
}

/// Integer power law obtained by rounding a continuous draw above
/// `xmin - 1/2`.
fn discrete_sample(alpha: f64, xmin: f64, seed: u64) -> Vec<f64> {
    let pareto =
        Pareto::new(xmin - 0.5, alpha - 1.0).expect("pareto parameters must be valid");
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..SAMPLE)
        .map(|_| (pareto.sample(&mut rng) + 0.5).floor())
        .collect()
}

#[rstest]
#[case(2.5, 11)]
#[case(2.1, 12)]
#[case(3.0, 13)]
fn fixed_cutoff_recovers_continuous_alpha(#[case] alpha: f64, #[case] seed: u64) {
    let estimator =
        PowerLawEstimator::new(EstimatorConfig::new().with_cutoff(Cutoff::Fixed(1.0)));
    let fit = estimator
        .fit(continuous_sample(alpha, 1.0, seed))
        .expect("sample must fit");

    assert_eq!(fit.tail_len, SAMPLE);
    assert_eq!(fit.sample_len, SAMPLE);
    assert!((fit.alpha - alpha).abs() < 0.05, "alpha {} vs {alpha}", fit.alpha);
    assert!(fit.std_error < 0.02);
    assert!(fit.ks_distance < 0.02, "ks {}", fit.ks_distance);
}

#[test]
fn automatic_cutoff_recovers_alpha_above_a_noisy_body() {
    // Uniform body below 5 followed by a clean tail with alpha = 2.5.
    let mut sample: Vec<f64> = (0..5_000_u32)
        .map(|i| 0.5 + 4.5 * f64::from(i) / 5_000.0)
        .collect();
    sample.extend(continuous_sample(2.5, 5.0, 21));

    let fit = estimate_exponent(sample).expect("sample must fit");
    assert!((fit.alpha - 2.5).abs() < 0.1, "alpha {}", fit.alpha);
    assert!(fit.xmin >= 4.0, "xmin {}", fit.xmin);
    assert!(fit.tail_len < fit.sample_len);
}

#[test]
fn discrete_model_recovers_integer_alpha() {
    let estimator = PowerLawEstimator::new(
        EstimatorConfig::new()
            .with_model(TailModel::Discrete)
            .with_cutoff(Cutoff::Fixed(10.0)),
    );
    let fit = estimator
        .fit(discrete_sample(2.5, 10.0, 31))
        .expect("sample must fit");
    assert!((fit.alpha - 2.5).abs() < 0.1, "alpha {}", fit.alpha);
    assert_eq!(fit.model, TailModel::Discrete);
}

#[test]
fn discrete_auto_scan_stays_on_observed_values() {
    let sample = discrete_sample(2.5, 6.0, 41);
    let estimator =
        PowerLawEstimator::new(EstimatorConfig::new().with_model(TailModel::Discrete));
    let fit = estimator.fit(sample.iter().copied()).expect("sample must fit");
    assert!(sample.contains(&fit.xmin));
    assert!((fit.alpha - 2.5).abs() < 0.2, "alpha {}", fit.alpha);
}

#[test]
fn non_positive_observations_are_dropped() {
    let mut sample = continuous_sample(2.5, 1.0, 51);
    sample.extend([0.0, -3.0, 0.0]);
    let estimator =
        PowerLawEstimator::new(EstimatorConfig::new().with_cutoff(Cutoff::Fixed(1.0)));
    let fit = estimator.fit(sample).expect("sample must fit");
    assert_eq!(fit.sample_len, SAMPLE);
}

#[rstest]
#[case::nan(vec![1.0, f64::NAN, 2.0], EstimationError::NonFiniteObservation { index: 1 })]
#[case::infinite(vec![f64::INFINITY], EstimationError::NonFiniteObservation { index: 0 })]
#[case::empty(vec![], EstimationError::NoPositiveObservations)]
#[case::short(vec![1.0, 2.0, 3.0], EstimationError::TooFewObservations { got: 3, required: 10 })]
#[case::constant(vec![7.0; 30], EstimationError::Degenerate { xmin: 7.0 })]
fn rejects_unusable_input(#[case] sample: Vec<f64>, #[case] expected: EstimationError) {
    assert_eq!(estimate_exponent(sample), Err(expected));
}

#[rstest]
#[case(TailModel::Continuous, 0.0)]
#[case(TailModel::Continuous, f64::NAN)]
#[case(TailModel::Discrete, 0.5)]
fn rejects_invalid_fixed_cutoffs(#[case] model: TailModel, #[case] xmin: f64) {
    let estimator = PowerLawEstimator::new(
        EstimatorConfig::new()
            .with_model(model)
            .with_cutoff(Cutoff::Fixed(xmin)),
    );
    let err = estimator
        .fit([1.0, 2.0, 3.0])
        .expect_err("cutoff must be rejected");
    assert_eq!(err.code().as_str(), "ESTIMATION_INVALID_XMIN");
}

#[test]
fn fixed_cutoff_above_the_sample_leaves_no_tail() {
    let estimator =
        PowerLawEstimator::new(EstimatorConfig::new().with_cutoff(Cutoff::Fixed(100.0)));
    assert_eq!(
        estimator.fit(continuous_sample(2.5, 1.0, 61).into_iter().filter(|&x| x < 100.0)),
        Err(EstimationError::TooFewObservations {
            got: 0,
            required: DEFAULT_MIN_TAIL
        })
    );
}

#[test]
fn min_tail_is_at_least_two() {
    assert_eq!(EstimatorConfig::new().with_min_tail(0).min_tail(), 2);
}

#[test]
fn log_log_regression_is_a_rough_diagnostic() {
    let fit = log_log_regression(continuous_sample(2.5, 1.0, 71), 30).expect("sample must bin");
    // Sparse upper bins bias the slope; only the sign and rough size matter.
    assert!(fit.alpha() > 1.5 && fit.alpha() < 3.5, "alpha {}", fit.alpha());
    assert!(fit.bins_used >= 10);
}

proptest! {
    #[test]
    fn fits_are_well_formed(
        mut sample in vec(1.0_f64..1.0e6, 12..200),
    ) {
        sample.push(1.0);
        sample.push(2.0);
        let estimator = PowerLawEstimator::new(
            EstimatorConfig::new().with_cutoff(Cutoff::Fixed(1.0)),
        );
        let fit = estimator.fit(sample.iter().copied()).expect("sample must fit");
        prop_assert!(fit.alpha > 1.0);
        prop_assert!((0.0..=1.0).contains(&fit.ks_distance));
        prop_assert_eq!(fit.tail_len, sample.len());
    }

    #[test]
    fn automatic_cutoff_comes_from_the_sample(
        sample in vec(1.0_f64..1.0e3, 20..120),
    ) {
        match estimate_exponent(sample.iter().copied()) {
            Ok(fit) => {
                prop_assert!(sample.contains(&fit.xmin));
                prop_assert!(fit.tail_len >= DEFAULT_MIN_TAIL);
                prop_assert!(fit.alpha > 1.0);
            }
            Err(err) => {
                let degenerate = matches!(err, EstimationError::Degenerate { .. });
                prop_assert!(degenerate, "unexpected error {}", err);
            }
        }
    }
}
