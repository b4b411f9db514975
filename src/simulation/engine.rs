//! Projection engine.

use chrono::Duration;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{SimResult, SimulationError};
use crate::market::estimate_returns;
use crate::simulation::histogram::summarize;
use crate::simulation::runner::{run_simulations_parallel, SimulationBatchConfig};
use crate::types::config::SimulationConfig;
use crate::types::result::{
    HorizonProjection, ProjectionReport, StartPriceSource, TerminalSummary,
};
use crate::types::PriceSeries;

/// Projects a price series forward over every configured horizon.
///
/// Per run:
/// 1. Estimate drift and volatility from the full series
/// 2. Pick the starting price (caller override, else last close)
/// 3. For each horizon simulate terminal prices and bin them
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    /// Create a new simulation engine.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run a complete projection.
    ///
    /// `current_price` replaces the last close as the starting point when
    /// given; drift and volatility are still taken from the series.
    pub fn run(
        &self,
        series: &PriceSeries,
        current_price: Option<f64>,
    ) -> SimResult<ProjectionReport> {
        self.config.validate()?;

        let stats = estimate_returns(&series.closes())?;
        debug!(
            "Estimated mu={:.6} sigma={:.6} from {} log-returns",
            stats.mu, stats.sigma, stats.observations
        );

        let last = series.last().ok_or(SimulationError::InsufficientData { points: 0 })?;
        let (start_price, start_price_source) = resolve_start_price(last.close, current_price)?;

        let base_seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().gen());

        let mut projections = Vec::with_capacity(self.config.horizons.len());
        for &horizon in &self.config.horizons {
            info!(
                "Simulating {} trials over {horizon} from {start_price:.2}",
                self.config.num_simulations
            );

            let batch = SimulationBatchConfig {
                stats,
                start_price,
                num_days: horizon.days() as usize,
                num_simulations: self.config.num_simulations,
                seed: SimulationConfig::seed_for(base_seed, horizon),
                n_workers: self.config.n_workers,
            };
            let terminal_prices = run_simulations_parallel(&batch)?;
            let histogram = summarize(&terminal_prices, self.config.num_bins)?;
            let summary = TerminalSummary::from_prices(&terminal_prices)?;

            projections.push(HorizonProjection {
                horizon,
                start_date: last.date,
                end_date: last.date + Duration::days(horizon.days() as i64),
                terminal_prices,
                histogram,
                summary,
            });
        }

        Ok(ProjectionReport {
            statistics: stats,
            start_price,
            start_price_source,
            last_close: last.close,
            last_date: last.date,
            projections,
        })
    }
}

/// Choose the simulation's starting price.
pub fn resolve_start_price(
    last_close: f64,
    current_price: Option<f64>,
) -> SimResult<(f64, StartPriceSource)> {
    match current_price {
        Some(p) if p.is_finite() && p > 0.0 => Ok((p, StartPriceSource::Override)),
        Some(p) => Err(SimulationError::InvalidParameter(format!(
            "current price must be positive, got {p}"
        ))),
        None => Ok((last_close, StartPriceSource::LastClose)),
    }
}
