//! Geometric Brownian Motion price paths in daily log-return space.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::types::ReturnStatistics;

/// Source of normally distributed variates.
///
/// Every `rand::Rng` is one; tests can plug in a fixed sequence instead.
pub trait GaussianSource {
    /// Fill `out` with independent draws from N(mean, std_dev^2).
    fn fill_normal(&mut self, mean: f64, std_dev: f64, out: &mut [f64]);
}

impl<R: Rng + ?Sized> GaussianSource for R {
    #[inline]
    fn fill_normal(&mut self, mean: f64, std_dev: f64, out: &mut [f64]) {
        for x in out.iter_mut() {
            let z: f64 = StandardNormal.sample(self);
            *x = mean + std_dev * z;
        }
    }
}

/// Discrete GBM path driven by i.i.d. normal daily log-returns.
///
/// The price after `d` days is `start_price * exp(r_1 + ... + r_d)` where
/// each `r_i ~ N(mu, sigma^2)`. `mu` is already the mean log-return, so no
/// Ito correction is applied.
pub struct GbmPathProcess {
    /// Price at day 0
    start_price: f64,
    /// Mean daily log-return
    mu: f64,
    /// Standard deviation of daily log-returns
    sigma: f64,
    /// Cumulative log-return since day 0
    log_offset: f64,
    /// Scratch buffer for batched draws
    draws: Vec<f64>,
}

impl GbmPathProcess {
    /// Create a new path process.
    pub fn new(start_price: f64, mu: f64, sigma: f64) -> Self {
        Self {
            start_price,
            mu,
            sigma,
            log_offset: 0.0,
            draws: Vec::new(),
        }
    }

    pub fn from_statistics(start_price: f64, stats: &ReturnStatistics) -> Self {
        Self::new(start_price, stats.mu, stats.sigma)
    }

    /// Get current price.
    #[inline]
    pub fn current_price(&self) -> f64 {
        self.start_price * self.log_offset.exp()
    }

    /// Advance one day and return the new price.
    #[inline]
    pub fn step<G: GaussianSource + ?Sized>(&mut self, rng: &mut G) -> f64 {
        let mut r = [0.0];
        rng.fill_normal(self.mu, self.sigma, &mut r);
        self.log_offset += r[0];
        self.current_price()
    }

    /// Restart from day 0 and return the price after `num_days` days.
    ///
    /// Only the terminal value is kept; intermediate prices are never
    /// materialized.
    pub fn terminal<G: GaussianSource + ?Sized>(&mut self, num_days: usize, rng: &mut G) -> f64 {
        self.reset();
        self.draws.resize(num_days, 0.0);
        rng.fill_normal(self.mu, self.sigma, &mut self.draws);
        self.log_offset = self.draws.iter().sum();
        self.current_price()
    }

    /// Restart from day 0 and return the full path of `num_days` prices.
    pub fn sample_path<G: GaussianSource + ?Sized>(
        &mut self,
        num_days: usize,
        rng: &mut G,
    ) -> Vec<f64> {
        self.reset();
        self.draws.resize(num_days, 0.0);
        rng.fill_normal(self.mu, self.sigma, &mut self.draws);

        let mut path = Vec::with_capacity(num_days);
        for r in &self.draws {
            self.log_offset += r;
            path.push(self.start_price * self.log_offset.exp());
        }
        path
    }

    /// Reset the process to day 0.
    pub fn reset(&mut self) {
        self.log_offset = 0.0;
    }
}
