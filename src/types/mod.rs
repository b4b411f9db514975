//! Core types for the projection engine.

pub mod config;
pub mod price_series;
pub mod result;

pub use config::{Horizon, SimulationConfig};
pub use price_series::{PricePoint, PriceSeries};
pub use result::{
    HistogramBin, HorizonProjection, ProbabilityHistogram, ProjectionReport, ReturnStatistics,
    StartPriceSource, TerminalSummary,
};
