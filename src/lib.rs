//! Monte Carlo price projection engine.
//!
//! Estimates drift and volatility of daily log-returns from a closing-price
//! series, simulates geometric Brownian motion paths over fixed horizons and
//! summarizes the terminal prices as a probability histogram.

pub mod error;
pub mod market;
pub mod report;
pub mod simulation;
pub mod types;

pub use error::{SimResult, SimulationError};
pub use market::{estimate_returns, load_csv, GaussianSource, GbmPathProcess};
pub use simulation::{simulate, summarize, SimulationEngine};
pub use types::{
    Horizon, PriceSeries, ProbabilityHistogram, ProjectionReport, ReturnStatistics,
    SimulationConfig,
};

/// Load a CSV price series and project it with the given config.
///
/// # Arguments
/// * `path` - CSV file with `date` and `close` columns
/// * `config` - horizons, trial count, bin count and seed
/// * `current_price` - fresher quote to start from instead of the last close
pub fn project_csv<P: AsRef<std::path::Path>>(
    path: P,
    config: SimulationConfig,
    current_price: Option<f64>,
) -> SimResult<ProjectionReport> {
    let series = load_csv(path)?;
    SimulationEngine::new(config).run(&series, current_price)
}
