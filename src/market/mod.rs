//! Market data inputs: return estimation, price paths and series loading.

pub mod price_process;
pub mod returns;
pub mod source;

pub use price_process::{GaussianSource, GbmPathProcess};
pub use returns::{estimate_returns, log_returns};
pub use source::{load_csv, read_csv};
