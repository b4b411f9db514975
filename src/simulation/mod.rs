//! Simulation engine, parallel runner and histogram summarizer.

pub mod engine;
pub mod histogram;
pub mod runner;

pub use engine::{resolve_start_price, SimulationEngine};
pub use histogram::summarize;
pub use runner::{run_simulations_parallel, simulate, SimulationBatchConfig};
