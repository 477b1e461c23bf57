//! Power-law estimation benchmarks.
//!
//! Compares a fit at a known cutoff against the Kolmogorov–Smirnov cutoff
//! search over the same synthetic sample.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use ba_pns_benches::{
    error::BenchSetupError,
    params::EstimationBenchParams,
    source::{SampleConfig, pareto_sample},
};
use ba_pns_core::{Cutoff, EstimatorConfig, PowerLawEstimator};

const SEED: u64 = 7;
const ALPHA: f64 = 2.5;
const XMIN: f64 = 1.0;

/// Sample sizes to benchmark.
const SAMPLE_LENS: &[usize] = &[1_000, 10_000, 100_000];

fn estimation_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("powerlaw_fit");
    group.sample_size(20);

    for &sample_len in SAMPLE_LENS {
        let sample = pareto_sample(&SampleConfig {
            len: sample_len,
            alpha: ALPHA,
            xmin: XMIN,
            seed: SEED,
        })?;

        for auto_cutoff in [false, true] {
            let cutoff = if auto_cutoff {
                Cutoff::Auto
            } else {
                Cutoff::Fixed(XMIN)
            };
            let estimator = PowerLawEstimator::new(EstimatorConfig::new().with_cutoff(cutoff));
            estimator.fit(sample.iter().copied())?;

            let params = EstimationBenchParams {
                sample_len,
                auto_cutoff,
            };
            group.bench_with_input(
                BenchmarkId::from_parameter(params),
                &(estimator, &sample),
                |b, (estimator, sample)| b.iter(|| estimator.fit(sample.iter().copied())),
            );
        }
    }

    group.finish();
    Ok(())
}

fn estimation(c: &mut Criterion) {
    if let Err(err) = estimation_impl(c) {
        panic!("estimation benchmark setup failed: {err}");
    }
}

criterion_group!(benches, estimation);
criterion_main!(benches);
