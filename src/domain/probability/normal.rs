//! Normal and lognormal cumulative distribution functions.

use std::f64::consts::SQRT_2;

/// Φ(x) for the standard normal distribution.
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// P(X ≤ x) for a lognormal variable with the given median and log-std.
///
/// Zero at and below the origin.
pub fn lognormal_cdf(x: f64, median: f64, beta: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    standard_normal_cdf((x / median).ln() / beta)
}
