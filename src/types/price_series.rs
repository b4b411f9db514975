//! Historical daily closing prices.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{SimResult, SimulationError};

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Ordered series of daily closes.
///
/// Dates are strictly increasing and every close is positive and finite.
/// The series cannot be modified once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Validate and wrap a list of points.
    pub fn new(points: Vec<PricePoint>) -> SimResult<Self> {
        for (idx, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(SimulationError::InvalidSeries(format!(
                    "close on {} must be positive, got {}",
                    point.date, point.close
                )));
            }
            if idx > 0 && points[idx - 1].date >= point.date {
                return Err(SimulationError::InvalidSeries(format!(
                    "dates must be strictly increasing: {} follows {}",
                    point.date,
                    points[idx - 1].date
                )));
            }
        }
        Ok(Self { points })
    }

    /// Build a series of consecutive daily closes starting at `start`.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> SimResult<Self> {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + Duration::days(i as i64),
                close,
            })
            .collect();
        Self::new(points)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent close.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}
