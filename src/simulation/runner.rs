//! Terminal-price simulation, serial and parallel using rayon.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;

use crate::error::{SimResult, SimulationError};
use crate::market::{GaussianSource, GbmPathProcess};
use crate::types::ReturnStatistics;

/// Trials drawn from one random stream in the parallel runner.
///
/// Fixed so that the output does not depend on the worker count.
pub const TRIALS_PER_STREAM: usize = 256;

/// Configuration for a batch of trials at one horizon.
#[derive(Debug, Clone)]
pub struct SimulationBatchConfig {
    /// Drift and volatility of daily log-returns
    pub stats: ReturnStatistics,
    /// Price at day 0
    pub start_price: f64,
    /// Horizon in days
    pub num_days: usize,
    /// Number of independent trials
    pub num_simulations: usize,
    /// Base seed; each stream derives its own generator from it
    pub seed: u64,
    /// Number of parallel workers (None = auto-detect)
    pub n_workers: Option<usize>,
}

/// Reject parameters the simulator cannot run with.
pub fn validate_parameters(
    mu: f64,
    sigma: f64,
    start_price: f64,
    num_days: usize,
    num_simulations: usize,
) -> SimResult<()> {
    if !start_price.is_finite() || start_price <= 0.0 {
        return Err(SimulationError::InvalidParameter(format!(
            "start_price must be positive, got {start_price}"
        )));
    }
    if num_days == 0 {
        return Err(SimulationError::InvalidParameter(
            "num_days must be at least 1".to_string(),
        ));
    }
    if num_simulations == 0 {
        return Err(SimulationError::InvalidParameter(
            "num_simulations must be at least 1".to_string(),
        ));
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(SimulationError::InvalidParameter(format!(
            "sigma must be non-negative, got {sigma}"
        )));
    }
    if !mu.is_finite() {
        return Err(SimulationError::InvalidParameter(format!(
            "mu must be finite, got {mu}"
        )));
    }
    Ok(())
}

/// Simulate `num_simulations` GBM paths and return their terminal prices.
///
/// Each trial draws `num_days` independent N(mu, sigma^2) log-returns from
/// `rng`; the terminal price is `start_price * exp(sum)`.
pub fn simulate<G: GaussianSource + ?Sized>(
    mu: f64,
    sigma: f64,
    start_price: f64,
    num_days: usize,
    num_simulations: usize,
    rng: &mut G,
) -> SimResult<Vec<f64>> {
    validate_parameters(mu, sigma, start_price, num_days, num_simulations)?;

    let mut process = GbmPathProcess::new(start_price, mu, sigma);
    Ok((0..num_simulations)
        .map(|_| process.terminal(num_days, rng))
        .collect())
}

/// Run a batch of trials in parallel.
///
/// Trials are split into chunks of [`TRIALS_PER_STREAM`], each with its own
/// PCG stream, so no generator is shared between workers and the result is
/// identical for any worker count.
pub fn run_simulations_parallel(batch: &SimulationBatchConfig) -> SimResult<Vec<f64>> {
    let SimulationBatchConfig {
        stats,
        start_price,
        num_days,
        num_simulations,
        seed,
        n_workers,
    } = *batch;
    validate_parameters(stats.mu, stats.sigma, start_price, num_days, num_simulations)?;

    // Configure thread pool
    let n_workers = n_workers.unwrap_or_else(|| rayon::current_num_threads().min(8));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers)
        .build()
        .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;

    let n_chunks = num_simulations.div_ceil(TRIALS_PER_STREAM);
    let chunks: Vec<Vec<f64>> = pool.install(|| {
        (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let len = TRIALS_PER_STREAM.min(num_simulations - chunk * TRIALS_PER_STREAM);
                let mut rng = stream_rng(seed, chunk);
                let mut process = GbmPathProcess::from_statistics(start_price, &stats);
                (0..len)
                    .map(|_| process.terminal(num_days, &mut rng))
                    .collect()
            })
            .collect()
    });

    Ok(chunks.into_iter().flatten().collect())
}

/// Generator for one chunk: shared state seed, distinct PCG increment.
fn stream_rng(seed: u64, stream: usize) -> Pcg64 {
    let state: u128 = Pcg64::seed_from_u64(seed).gen();
    Pcg64::new(state, stream as u128)
}
