//! Drift and volatility estimation from daily closes.

use crate::error::{SimResult, SimulationError};
use crate::types::ReturnStatistics;

/// Log-returns `ln(p[t] / p[t-1])` over consecutive closes.
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Estimate the mean and sample standard deviation of daily log-returns.
///
/// The deviation is bias-corrected (ddof = 1). A series of exactly two
/// prices yields a single return, for which the deviation is defined as 0.
pub fn estimate_returns(prices: &[f64]) -> SimResult<ReturnStatistics> {
    if prices.len() < 2 {
        return Err(SimulationError::InsufficientData {
            points: prices.len(),
        });
    }
    if let Some(bad) = prices.iter().find(|p| !p.is_finite() || **p <= 0.0) {
        return Err(SimulationError::InvalidParameter(format!(
            "prices must be positive and finite, got {bad}"
        )));
    }

    let returns = log_returns(prices);
    let n = returns.len() as f64;
    let mu = returns.iter().sum::<f64>() / n;

    let sigma = if returns.len() > 1 {
        let ss: f64 = returns.iter().map(|r| (r - mu) * (r - mu)).sum();
        (ss / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    Ok(ReturnStatistics {
        mu,
        sigma,
        observations: returns.len(),
    })
}
