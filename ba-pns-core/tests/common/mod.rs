//! Helpers shared by the integration suites.

use ba_pns_core::{EdgeGrowthEngine, GrowthConfig};
use ba_pns_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

/// Proptest configuration honouring `PROGTEST_CASES` and `BA_PNS_PBT_FORK`.
#[must_use]
pub fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Grows `config` to completion.
///
/// # Panics
/// Panics when the engine cannot be built or generation fails.
#[must_use]
pub fn grow(config: GrowthConfig) -> EdgeGrowthEngine {
    let mut engine = EdgeGrowthEngine::new(config).expect("engine must build");
    engine.generate().expect("generation must succeed");
    engine
}
