//! Projection result types.

use std::ops::Range;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{SimResult, SimulationError};
use crate::types::config::Horizon;

/// Drift and volatility of daily log-returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStatistics {
    /// Mean daily log-return
    pub mu: f64,
    /// Sample standard deviation of daily log-returns (ddof = 1)
    pub sigma: f64,
    /// Number of log-returns the estimate is based on
    pub observations: usize,
}

/// One price range of a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge (exclusive, except for the last bin)
    pub upper: f64,
    /// Number of terminal prices in the range
    pub count: usize,
    /// Share of terminal prices in the range, in percent
    pub probability: f64,
}

/// Discretized distribution of terminal prices.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityHistogram {
    /// Contiguous, equal-width bins in ascending price order
    pub bins: Vec<HistogramBin>,
    /// Number of terminal prices summarized
    pub sample_size: usize,
}

impl ProbabilityHistogram {
    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bin edges, `len() + 1` values.
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(|b| b.lower).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.upper);
        }
        edges
    }

    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|b| b.count).collect()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.probability).collect()
    }

    /// Index of the highest-probability bin; the lowest index wins ties.
    pub fn most_likely(&self) -> Option<usize> {
        self.bins
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (idx, bin)| match best {
                Some((_, p)) if p >= bin.probability => best,
                _ => Some((idx, bin.probability)),
            })
            .map(|(idx, _)| idx)
    }

    /// Bin indices ordered by descending probability (stable on ties).
    pub fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.bins.len()).collect();
        order.sort_by(|&a, &b| self.bins[b].probability.total_cmp(&self.bins[a].probability));
        order
    }

    /// Combined probability of a run of adjacent bins, in percent.
    pub fn cumulative_probability(&self, range: Range<usize>) -> f64 {
        let end = range.end.min(self.bins.len());
        let start = range.start.min(end);
        self.bins[start..end].iter().map(|b| b.probability).sum()
    }
}

/// Descriptive statistics of terminal prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalSummary {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (ddof = 1, zero for a single value)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl TerminalSummary {
    pub fn from_prices(prices: &[f64]) -> SimResult<Self> {
        if prices.is_empty() {
            return Err(SimulationError::EmptySample);
        }

        let n = prices.len() as f64;
        let mean = prices.iter().sum::<f64>() / n;
        let std_dev = if prices.len() > 1 {
            let ss: f64 = prices.iter().map(|p| (p - mean) * (p - mean)).sum();
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        let mut sorted = prices.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            0.5 * (sorted[mid - 1] + sorted[mid])
        } else {
            sorted[mid]
        };

        Ok(Self {
            mean,
            median,
            std_dev,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Where the simulation's starting price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPriceSource {
    /// Last close of the historical series
    LastClose,
    /// Price supplied by the caller (e.g. a real-time quote)
    Override,
}

/// Projection for one horizon.
#[derive(Debug, Clone)]
pub struct HorizonProjection {
    pub horizon: Horizon,
    /// Date of the last historical close
    pub start_date: NaiveDate,
    /// `start_date` plus the horizon
    pub end_date: NaiveDate,
    /// Terminal price of every trial, in trial order
    pub terminal_prices: Vec<f64>,
    pub histogram: ProbabilityHistogram,
    pub summary: TerminalSummary,
}

/// Full projection for one price series.
#[derive(Debug, Clone)]
pub struct ProjectionReport {
    pub statistics: ReturnStatistics,
    pub start_price: f64,
    pub start_price_source: StartPriceSource,
    pub last_close: f64,
    pub last_date: NaiveDate,
    pub projections: Vec<HorizonProjection>,
}
