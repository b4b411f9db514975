//! Terminal-price histogram.

use tracing::warn;

use crate::error::{SimResult, SimulationError};
use crate::types::{HistogramBin, ProbabilityHistogram};

/// Relative half-width used to widen a zero-width price range.
const DEGENERATE_HALF_WIDTH: f64 = 1e-6;

/// Bin terminal prices into `num_bins` equal-width ranges over `[min, max]`.
///
/// Bin `i` holds values in `[edge[i], edge[i + 1])`; the last bin also holds
/// the maximum. When every value is identical the range is widened to
/// `[v - h, v + h]` with `h = |v| * 1e-6` (0.5 when `v == 0`), so all of the
/// probability lands in bin `num_bins / 2`.
pub fn summarize(terminal_prices: &[f64], num_bins: usize) -> SimResult<ProbabilityHistogram> {
    if terminal_prices.is_empty() {
        return Err(SimulationError::EmptySample);
    }
    if num_bins == 0 {
        return Err(SimulationError::InvalidParameter(
            "num_bins must be at least 1".to_string(),
        ));
    }
    if let Some(bad) = terminal_prices.iter().find(|p| !p.is_finite()) {
        return Err(SimulationError::InvalidParameter(format!(
            "terminal prices must be finite, got {bad}"
        )));
    }

    let (mut lo, mut hi) = terminal_prices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });

    if lo == hi {
        let half = if lo == 0.0 {
            0.5
        } else {
            lo.abs() * DEGENERATE_HALF_WIDTH
        };
        warn!("All {} terminal prices equal {lo}; widening histogram range by {half}", terminal_prices.len());
        lo -= half;
        hi += half;
    }

    let edges = linspace(lo, hi, num_bins + 1);
    let mut counts = vec![0usize; num_bins];
    for &p in terminal_prices {
        // First edge strictly greater than p, minus one; the maximum folds
        // into the last bin.
        let idx = edges.partition_point(|&e| e <= p).saturating_sub(1);
        counts[idx.min(num_bins - 1)] += 1;
    }

    let n = terminal_prices.len() as f64;
    let bins = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            lower: edges[i],
            upper: edges[i + 1],
            count,
            probability: 100.0 * count as f64 / n,
        })
        .collect();

    Ok(ProbabilityHistogram {
        bins,
        sample_size: terminal_prices.len(),
    })
}

/// `num` evenly spaced values from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    if num == 1 {
        return vec![start];
    }
    let step = (stop - start) / (num - 1) as f64;
    let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
    out[num - 1] = stop;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_distr::{Distribution, LogNormal};
    use rand_pcg::Pcg64;

    #[test]
    fn test_bin_boundaries_exact() {
        let h = summarize(&[10.0, 10.0, 20.0, 20.0, 20.0, 30.0], 3).unwrap();
        let edges = h.edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], 10.0);
        assert!((edges[1] - 50.0 / 3.0).abs() < 1e-12);
        assert!((edges[2] - 70.0 / 3.0).abs() < 1e-12);
        assert_eq!(edges[3], 30.0);

        assert_eq!(h.counts(), vec![2, 3, 1]);
        assert_eq!(h.counts().iter().sum::<usize>(), 6);
        assert!((h.probabilities()[1] - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_shared_edge_counted_once() {
        // 15.0 sits exactly on the inner edge of [10, 20] split in two
        let h = summarize(&[10.0, 15.0, 20.0], 2).unwrap();
        assert_eq!(h.edges(), vec![10.0, 15.0, 20.0]);
        assert_eq!(h.counts(), vec![1, 2]);
    }

    #[test]
    fn test_probabilities_sum_to_hundred() {
        let mut rng = Pcg64::seed_from_u64(42);
        let dist = LogNormal::new(4.6, 0.3).unwrap();
        let prices: Vec<f64> = (0..1000).map(|_| dist.sample(&mut rng)).collect();

        let h = summarize(&prices, 9).unwrap();
        assert_eq!(h.len(), 9);
        assert_eq!(h.counts().iter().sum::<usize>(), prices.len());
        let total: f64 = h.probabilities().iter().sum();
        assert!((total - 100.0).abs() <= 100.0 * 1e-6);
        for bin in &h.bins {
            assert!(bin.lower < bin.upper);
        }
    }

    #[test]
    fn test_single_value_fallback() {
        let h = summarize(&[123.45], 9).unwrap();
        assert_eq!(h.len(), 9);
        let hits: Vec<usize> = h
            .bins
            .iter()
            .enumerate()
            .filter(|(_, b)| b.count > 0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hits, vec![4]);
        assert_eq!(h.bins[4].probability, 100.0);
        assert!(h.bins.iter().all(|b| b.lower < b.upper));
        assert!(h.bins.iter().all(|b| b.lower.is_finite() && b.upper.is_finite()));
    }

    #[test]
    fn test_identical_values_fallback() {
        let h = summarize(&[100.0; 5], 9).unwrap();
        assert_eq!(h.counts(), vec![0, 0, 0, 0, 5, 0, 0, 0, 0]);
        assert_eq!(h.most_likely(), Some(4));

        let zero = summarize(&[0.0, 0.0], 3).unwrap();
        assert_eq!(zero.edges()[0], -0.5);
        assert_eq!(zero.counts(), vec![0, 2, 0]);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(summarize(&[], 9), Err(SimulationError::EmptySample)));
        assert!(matches!(
            summarize(&[1.0, 2.0], 0),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(matches!(
            summarize(&[1.0, f64::NAN], 3),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_linspace_endpoints() {
        let e = linspace(1.0, 2.0, 5);
        assert_eq!(e, vec![1.0, 1.25, 1.5, 1.75, 2.0]);
    }
}
