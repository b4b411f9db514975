//! Benchmarks for the simulation engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_pcg::Pcg64;

fn benchmark_estimate_returns(c: &mut Criterion) {
    use mc_price_sim::estimate_returns;

    let prices: Vec<f64> = (0..365).map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0).collect();

    c.bench_function("estimate_returns_1y", |bench| {
        bench.iter(|| estimate_returns(black_box(&prices)))
    });
}

fn benchmark_path_process(c: &mut Criterion) {
    use mc_price_sim::GbmPathProcess;

    let mut rng = Pcg64::seed_from_u64(42);
    let mut process = GbmPathProcess::new(100.0, 0.0005, 0.03);

    c.bench_function("gbm_terminal_90d", |bench| {
        bench.iter(|| process.terminal(black_box(90), &mut rng))
    });
}

fn benchmark_simulate(c: &mut Criterion) {
    use mc_price_sim::simulate;

    let mut rng = Pcg64::seed_from_u64(42);

    c.bench_function("simulate_1000x30", |bench| {
        bench.iter(|| simulate(0.0005, 0.03, 100.0, 30, black_box(1000), &mut rng))
    });
}

fn benchmark_parallel_runner(c: &mut Criterion) {
    use mc_price_sim::simulation::runner::{run_simulations_parallel, SimulationBatchConfig};
    use mc_price_sim::ReturnStatistics;

    let batch = SimulationBatchConfig {
        stats: ReturnStatistics {
            mu: 0.0005,
            sigma: 0.03,
            observations: 364,
        },
        start_price: 100.0,
        num_days: 90,
        num_simulations: 10_000,
        seed: 42,
        n_workers: None,
    };

    c.bench_function("parallel_10000x90", |bench| {
        bench.iter(|| run_simulations_parallel(black_box(&batch)))
    });
}

fn benchmark_summarize(c: &mut Criterion) {
    use mc_price_sim::{simulate, summarize};

    let mut rng = Pcg64::seed_from_u64(7);
    let prices = simulate(0.0, 0.03, 100.0, 30, 1000, &mut rng).unwrap_or_default();

    c.bench_function("summarize_1000_9bins", |bench| {
        bench.iter(|| summarize(black_box(&prices), 9))
    });
}

criterion_group!(
    benches,
    benchmark_estimate_returns,
    benchmark_path_process,
    benchmark_simulate,
    benchmark_parallel_runner,
    benchmark_summarize,
);

criterion_main!(benches);
