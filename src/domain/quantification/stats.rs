//! Summary statistics over sampled results.

use serde::{Deserialize, Serialize};

/// Marks a value that could not be computed.
pub const SENTINEL: f64 = -1.0;

/// Point estimate plus the spread of the sampled values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub point: f64,
    pub mean: f64,
    pub median: f64,
    pub sd: f64,
    pub p5: f64,
    pub p95: f64,
}

impl Summary {
    /// Column labels matching `as_row`.
    pub const COLUMNS: [&'static str; 6] = ["pe", "mean", "median", "sd", "p5", "p95"];

    /// Every statistic set to the sentinel.
    pub fn sentinel() -> Self {
        Self::constant(SENTINEL)
    }

    /// A value with no spread.
    pub fn constant(value: f64) -> Self {
        Self {
            point: value,
            mean: value,
            median: value,
            sd: if value == SENTINEL { SENTINEL } else { 0.0 },
            p5: value,
            p95: value,
        }
    }

    /// Summarises `values`, where `values[0]` is the point estimate and the
    /// rest are samples.
    ///
    /// With no samples the statistics describe the point estimate alone.
    /// Non-finite values are dropped; a statistic with nothing left to
    /// describe is the sentinel.
    pub fn from_samples(values: &[f64]) -> Self {
        let Some(first) = values.first() else {
            return Self::sentinel();
        };
        let point = if first.is_finite() { *first } else { SENTINEL };
        let population = if values.len() > 1 { &values[1..] } else { values };

        let mut finite: Vec<f64> = population.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Self {
                point,
                ..Self::sentinel()
            };
        }
        finite.sort_by(f64::total_cmp);

        let n = finite.len() as f64;
        let mean = finite.iter().sum::<f64>() / n;
        let variance = finite.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        Self {
            point,
            mean,
            median: median(&finite),
            sd: variance.sqrt(),
            p5: percentile(&finite, 5.0),
            p95: percentile(&finite, 95.0),
        }
    }

    pub fn as_row(&self) -> [f64; 6] {
        [self.point, self.mean, self.median, self.sd, self.p5, self.p95]
    }

    pub fn is_sentinel(&self) -> bool {
        self.point == SENTINEL
    }
}

fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    }
}

/// Percentile at rank `(n + 1) p / 100`, interpolating between neighbours
/// and clamping to the extremes.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let rank = (n as f64 + 1.0) * p / 100.0;
    if rank <= 1.0 {
        return sorted[0];
    }
    if rank >= n as f64 {
        return sorted[n - 1];
    }
    let lower = rank.floor() as usize;
    let frac = rank - lower as f64;
    sorted[lower - 1] + frac * (sorted[lower] - sorted[lower - 1])
}
