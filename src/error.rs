//! Error type shared by the estimator, simulator and summarizer.

use thiserror::Error;

/// Errors that can occur while estimating, simulating or summarizing.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Insufficient data: need at least 2 prices, got {points}")]
    InsufficientData { points: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No terminal prices to summarize")]
    EmptySample,

    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SimResult<T> = Result<T, SimulationError>;
