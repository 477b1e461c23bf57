//! Network growth benchmarks.
//!
//! Measures the time to grow a complete network from its seed graph for
//! both topologies, with transaction amounts enabled.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use ba_pns_benches::{error::BenchSetupError, params::GrowthBenchParams};
use ba_pns_core::{EdgeGrowthEngine, GrowthConfig};

/// Seed used for every benchmarked network.
const SEED: u64 = 42;

/// Size of the complete seed graph.
const SEED_NODES: usize = 5;

/// Network sizes to benchmark.
const NODE_COUNTS: &[usize] = &[1_000, 5_000, 20_000];

/// Edges attached per growth step.
const EDGES_PER_STEP: usize = 3;

fn grow(config: &GrowthConfig) -> Result<usize, BenchSetupError> {
    let mut engine = EdgeGrowthEngine::new(config.clone())?;
    Ok(engine.generate()?.edges)
}

fn growth_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("growth");
    group.sample_size(20);

    for &nodes in NODE_COUNTS {
        let params = GrowthBenchParams {
            nodes,
            edges_per_step: EDGES_PER_STEP,
        };
        let undirected =
            GrowthConfig::undirected(nodes, SEED_NODES, EDGES_PER_STEP)?.with_rng_seed(SEED);
        let directed = GrowthConfig::directed(nodes, SEED_NODES, EDGES_PER_STEP, EDGES_PER_STEP)?
            .with_rng_seed(SEED);
        // Fail setup rather than inside the timing loop.
        grow(&undirected)?;
        grow(&directed)?;

        group.bench_with_input(
            BenchmarkId::new("undirected", params),
            &undirected,
            |b, config| b.iter(|| grow(config)),
        );
        group.bench_with_input(
            BenchmarkId::new("directed", params),
            &directed,
            |b, config| b.iter(|| grow(config)),
        );
    }

    group.finish();
    Ok(())
}

fn growth(c: &mut Criterion) {
    if let Err(err) = growth_impl(c) {
        panic!("growth benchmark setup failed: {err}");
    }
}

criterion_group!(benches, growth);
criterion_main!(benches);
