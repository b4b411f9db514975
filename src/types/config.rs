//! Simulation configuration.

use derive_more::{Display, From};

use crate::error::{SimResult, SimulationError};

/// Default projection horizons, in days.
pub const DEFAULT_HORIZONS: [u32; 3] = [7, 30, 90];

/// Default number of trials per horizon.
pub const DEFAULT_NUM_SIMULATIONS: usize = 1000;

/// Default number of histogram intervals (one more edge than this).
pub const DEFAULT_NUM_BINS: usize = 9;

/// Projection horizon measured in calendar days.
#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{_0} days")]
pub struct Horizon(pub u32);

impl Horizon {
    #[inline]
    pub fn days(self) -> u32 {
        self.0
    }
}

/// Configuration for a projection run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Horizons to project
    pub horizons: Vec<Horizon>,

    /// Number of independent trials per horizon
    pub num_simulations: usize,

    /// Number of histogram intervals
    pub num_bins: usize,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Number of parallel workers (None = auto-detect)
    pub n_workers: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizons: DEFAULT_HORIZONS.iter().copied().map(Horizon).collect(),
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            num_bins: DEFAULT_NUM_BINS,
            seed: None,
            n_workers: None,
        }
    }
}

impl SimulationConfig {
    /// Build a config from the process environment, reading `.env` first.
    ///
    /// Recognized keys: `MC_HORIZONS` (comma separated days), `MC_SIMULATIONS`,
    /// `MC_BINS`, `MC_SEED`, `MC_WORKERS`. Missing keys keep their defaults.
    pub fn from_env() -> SimResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> SimResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("MC_HORIZONS") {
            config.horizons = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<u32>()
                        .map(Horizon)
                        .map_err(|e| SimulationError::Config(format!("MC_HORIZONS: {e}")))
                })
                .collect::<SimResult<Vec<_>>>()?;
        }
        if let Some(raw) = lookup("MC_SIMULATIONS") {
            config.num_simulations = parse_key("MC_SIMULATIONS", &raw)?;
        }
        if let Some(raw) = lookup("MC_BINS") {
            config.num_bins = parse_key("MC_BINS", &raw)?;
        }
        if let Some(raw) = lookup("MC_SEED") {
            config.seed = Some(parse_key("MC_SEED", &raw)?);
        }
        if let Some(raw) = lookup("MC_WORKERS") {
            config.n_workers = Some(parse_key("MC_WORKERS", &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulator cannot run.
    pub fn validate(&self) -> SimResult<()> {
        if self.horizons.is_empty() {
            return Err(SimulationError::Config(
                "at least one horizon is required".to_string(),
            ));
        }
        if let Some(h) = self.horizons.iter().find(|h| h.days() == 0) {
            return Err(SimulationError::Config(format!("horizon must be positive, got {h}")));
        }
        if self.num_simulations == 0 {
            return Err(SimulationError::Config(
                "num_simulations must be at least 1".to_string(),
            ));
        }
        if self.num_bins == 0 {
            return Err(SimulationError::Config("num_bins must be at least 1".to_string()));
        }
        if self.n_workers == Some(0) {
            return Err(SimulationError::Config("n_workers must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Derive the seed used for one horizon.
    ///
    /// Horizons draw from distinct streams so that adding or removing one
    /// does not shift the others.
    pub fn seed_for(base: u64, horizon: Horizon) -> u64 {
        base ^ (horizon.days() as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

fn parse_key<T>(key: &str, raw: &str) -> SimResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| SimulationError::Config(format!("{key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.horizons, vec![Horizon(7), Horizon(30), Horizon(90)]);
        assert_eq!(config.num_simulations, 1000);
        assert_eq!(config.num_bins, 9);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = SimulationConfig::from_lookup(lookup(&[
            ("MC_HORIZONS", "5, 14"),
            ("MC_SIMULATIONS", "250"),
            ("MC_BINS", "4"),
            ("MC_SEED", "42"),
            ("MC_WORKERS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.horizons, vec![Horizon(5), Horizon(14)]);
        assert_eq!(config.num_simulations, 250);
        assert_eq!(config.num_bins, 4);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.n_workers, Some(2));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = SimulationConfig::from_lookup(lookup(&[("MC_SIMULATIONS", "lots")])).unwrap_err();
        assert!(matches!(err, SimulationError::Config(msg) if msg.starts_with("MC_SIMULATIONS")));
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let mut config = SimulationConfig::default();
        config.num_simulations = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.horizons = vec![Horizon(0)];
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.horizons.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_horizon_display() {
        assert_eq!(Horizon(30).to_string(), "30 days");
        assert_eq!(Horizon::from(7).days(), 7);
    }

    #[test]
    fn test_seed_for_distinct_per_horizon() {
        let a = SimulationConfig::seed_for(42, Horizon(7));
        let b = SimulationConfig::seed_for(42, Horizon(30));
        assert_ne!(a, b);
        assert_eq!(a, SimulationConfig::seed_for(42, Horizon(7)));
    }
}
