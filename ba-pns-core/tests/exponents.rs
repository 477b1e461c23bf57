//! End-to-end exponent measurements on grown networks.

mod common;

use ba_pns_core::{
    Ensemble, EstimatorConfig, GrowthConfig, NetworkExponents, PowerLawEstimator, TailModel,
    degree_observations,
};

use common::grow;

#[test]
fn undirected_growth_has_a_scale_free_degree_tail() {
    let config = GrowthConfig::undirected(10_000, 4, 3)
        .expect("configuration must be valid")
        .with_amounts(false)
        .with_rng_seed(2_718);
    let engine = grow(config);

    let fit = PowerLawEstimator::new(EstimatorConfig::new().with_model(TailModel::Discrete))
        .fit(degree_observations(&engine.graph().degrees()))
        .expect("degree tail must fit");
    // Linear preferential attachment converges to gamma = 3.
    assert!((2.4..3.6).contains(&fit.alpha), "alpha {}", fit.alpha);
    assert!(fit.xmin >= 3.0);
}

#[test]
fn ensemble_reports_exponents_for_every_run() {
    let config = GrowthConfig::directed(1_500, 3, 2, 2).expect("configuration must be valid");
    let reports = Ensemble::new(config, 4)
        .with_base_seed(99)
        .run(NetworkExponents::measure)
        .expect("runs must succeed");

    assert_eq!(reports.len(), 4);
    for report in &reports {
        assert_eq!(report.outcomes().count(), 4);
        let fit = report.in_degree.as_ref().expect("in-degree must fit");
        assert!(fit.alpha > 1.0);
    }
}
