//! Convolution of fragilities with hazard frequencies.

use serde::{Deserialize, Serialize};

use super::{HazardCurve, IntensityBins};
use crate::domain::probability::lognormal_cdf;

/// Hazard convolution functions.
pub struct HazardIntegrator;

impl HazardIntegrator {
    /// Annual frequency of the IM falling in each bin,
    /// `H(lower edge) - H(upper edge)`.
    pub fn deltas(curve: &HazardCurve, bins: &IntensityBins) -> Vec<f64> {
        bins.edges()
            .windows(2)
            .map(|w| curve.exceedance(w[0]) - curve.exceedance(w[1]))
            .collect()
    }

    /// Annual failure frequency: Σ P(fail | bin) · Δ(bin).
    pub fn convolve(fragility: &[f64], deltas: &[f64]) -> f64 {
        fragility.iter().zip(deltas).map(|(p, d)| p * d).sum()
    }
}

/// Lognormal fragility parameters fitted to tabulated failure probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LognormalFit {
    pub median: f64,
    pub beta: f64,
}

const FIT_GRID: usize = 48;
const FIT_REFINEMENTS: usize = 10;
const FIT_BETA_RANGE: (f64, f64) = (0.01, 3.0);

impl LognormalFit {
    /// Least-squares fit of `Φ(ln(im / median) / beta)` to `(im, p)` pairs.
    ///
    /// Searches a grid over ln(median) and beta, then repeatedly narrows the
    /// grid around the best point. Returns `None` when the probabilities are
    /// all equal, since no curve shape is identifiable.
    pub fn fit(ims: &[f64], probabilities: &[f64]) -> Option<Self> {
        let n = ims.len().min(probabilities.len());
        if n < 2 {
            return None;
        }
        let (ims, probabilities) = (&ims[..n], &probabilities[..n]);
        let lowest = probabilities.iter().cloned().fold(f64::INFINITY, f64::min);
        let highest = probabilities.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if !(highest > lowest) {
            return None;
        }

        let sse = |log_median: f64, beta: f64| -> f64 {
            let median = log_median.exp();
            ims.iter()
                .zip(probabilities)
                .map(|(im, p)| {
                    let r = lognormal_cdf(*im, median, beta) - p;
                    r * r
                })
                .sum()
        };

        let log_ims: Vec<f64> = ims.iter().map(|im| im.ln()).collect();
        let min_log = log_ims.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_log = log_ims.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = (max_log - min_log).max(1.0);

        let mut median_range = (min_log - span, max_log + span);
        let mut beta_range = FIT_BETA_RANGE;
        let mut best = (0.5 * (median_range.0 + median_range.1), 0.5 * (beta_range.0 + beta_range.1));
        let mut best_err = f64::INFINITY;

        for _ in 0..FIT_REFINEMENTS {
            let median_step = (median_range.1 - median_range.0) / FIT_GRID as f64;
            let beta_step = (beta_range.1 - beta_range.0) / FIT_GRID as f64;
            for i in 0..=FIT_GRID {
                let log_median = median_range.0 + median_step * i as f64;
                for j in 0..=FIT_GRID {
                    let beta = beta_range.0 + beta_step * j as f64;
                    if beta <= 0.0 {
                        continue;
                    }
                    let err = sse(log_median, beta);
                    if err < best_err {
                        best_err = err;
                        best = (log_median, beta);
                    }
                }
            }
            median_range = (best.0 - 3.0 * median_step, best.0 + 3.0 * median_step);
            beta_range = (
                (best.1 - 3.0 * beta_step).max(FIT_BETA_RANGE.0 * 0.1),
                best.1 + 3.0 * beta_step,
            );
        }

        Some(Self {
            median: best.0.exp(),
            beta: best.1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_telescope_to_range_exceedance() {
        let curve = HazardCurve::default_curve();
        let bins = IntensityBins::log_spaced(0.1, 4.0, 15).unwrap();
        let total: f64 = HazardIntegrator::deltas(&curve, &bins).iter().sum();
        let expected = curve.exceedance(0.1) - curve.exceedance(4.0);
        assert!(((total - expected) / expected).abs() < 1e-12);
    }

    #[test]
    fn deltas_are_non_negative() {
        let curve = HazardCurve::default_curve();
        let bins = IntensityBins::log_spaced(0.05, 3.0, 20).unwrap();
        assert!(HazardIntegrator::deltas(&curve, &bins).iter().all(|d| *d >= 0.0));
    }

    #[test]
    fn convolve_is_weighted_sum() {
        assert_eq!(HazardIntegrator::convolve(&[0.5, 1.0], &[2e-3, 1e-3]), 2e-3);
    }

    #[test]
    fn fit_recovers_lognormal_parameters() {
        let bins = IntensityBins::log_spaced(0.1, 4.0, 15).unwrap();
        let ims = bins.centers();
        let probabilities: Vec<f64> = ims.iter().map(|im| lognormal_cdf(*im, 1.5, 0.4)).collect();
        let fit = LognormalFit::fit(&ims, &probabilities).unwrap();
        assert!((fit.median - 1.5).abs() < 1e-3, "median {}", fit.median);
        assert!((fit.beta - 0.4).abs() < 1e-3, "beta {}", fit.beta);
    }

    #[test]
    fn fit_needs_variation() {
        assert!(LognormalFit::fit(&[0.1, 1.0], &[0.0, 0.0]).is_none());
        assert!(LognormalFit::fit(&[0.1], &[0.5]).is_none());
    }
}
