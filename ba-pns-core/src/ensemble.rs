//! Independent realisations of one growth configuration.
//!
//! Each run owns its own engine and random stream, so runs share nothing and
//! are evaluated in parallel with Rayon when the `parallel` feature is
//! enabled. Per-run seeds are derived with SplitMix64 from a base seed and the
//! run index, which makes every run reproducible regardless of scheduling.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{Result, config::GrowthConfig, engine::EdgeGrowthEngine};

/// SplitMix64 increment (the 64-bit golden ratio) used for per-run seed
/// derivation.
const RUN_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Seed of run `run_index` in an ensemble seeded with `base_seed`.
///
/// # Examples
/// ```
/// use ba_pns_core::run_seed;
///
/// assert_eq!(run_seed(7, 3), run_seed(7, 3));
/// assert_ne!(run_seed(7, 3), run_seed(7, 4));
/// ```
#[inline]
#[must_use]
pub fn run_seed(base_seed: u64, run_index: usize) -> u64 {
    splitmix64(base_seed ^ ((run_index as u64).wrapping_add(1)).wrapping_mul(RUN_SEED_SPACING))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(RUN_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Runs one configuration many times with independent random streams.
///
/// # Examples
/// ```
/// use ba_pns_core::{Ensemble, GrowthConfig};
///
/// let config = GrowthConfig::directed(50, 3, 2, 2)?;
/// let edge_counts = Ensemble::new(config, 4)
///     .with_base_seed(11)
///     .run(|engine| engine.edges().len())?;
/// assert_eq!(edge_counts, vec![6 + 47 * 4; 4]);
/// # Ok::<(), ba_pns_core::GrowthError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Ensemble {
    config: GrowthConfig,
    runs: usize,
    base_seed: u64,
}

impl Ensemble {
    /// Creates an ensemble of `runs` realisations of `config`. The base seed
    /// defaults to the configuration's seed.
    #[must_use]
    pub fn new(config: GrowthConfig, runs: usize) -> Self {
        let base_seed = config.rng_seed();
        Self {
            config,
            runs,
            base_seed,
        }
    }

    /// Overrides the seed from which run seeds are derived.
    #[must_use]
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Number of runs.
    #[must_use]
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Grows every run to completion and maps the finished engine through
    /// `observe`. Results are returned in run order.
    ///
    /// # Errors
    /// Returns the first [`crate::GrowthError`] raised by any run, in run
    /// order.
    #[instrument(
        name = "growth.ensemble",
        err,
        skip(self, observe),
        fields(runs = self.runs, base_seed = self.base_seed),
    )]
    pub fn run<T, F>(&self, observe: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&EdgeGrowthEngine) -> T + Sync,
    {
        let realise = |index: usize| -> Result<T> {
            let seed = run_seed(self.base_seed, index);
            let config = self.config.clone().with_rng_seed(seed);
            let mut engine = EdgeGrowthEngine::new(config)?;
            engine.generate()?;
            debug!(run = index, seed, "ensemble run completed");
            Ok(observe(&engine))
        };

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Result<T>> = (0..self.runs).into_par_iter().map(realise).collect();
        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Result<T>> = (0..self.runs).map(realise).collect();

        outcomes.into_iter().collect()
    }
}
