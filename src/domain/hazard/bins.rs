//! Intensity-measure bins.

use serde::Serialize;

use crate::domain::foundation::ModelError;

/// Contiguous bins over the intensity measure, described by their edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityBins {
    edges: Vec<f64>,
}

impl IntensityBins {
    /// `count` bins with log-spaced edges from `lower` to `upper`.
    pub fn log_spaced(lower: f64, upper: f64, count: usize) -> Result<Self, ModelError> {
        if !(lower > 0.0 && upper > lower && upper.is_finite()) {
            return Err(ModelError::InvalidSettings(format!(
                "intensity range must satisfy 0 < lower < upper, got [{}, {}]",
                lower, upper
            )));
        }
        if count == 0 {
            return Err(ModelError::InvalidSettings("at least one bin is required".to_string()));
        }
        let (log_lower, log_upper) = (lower.ln(), upper.ln());
        let step = (log_upper - log_lower) / count as f64;
        let mut edges: Vec<f64> = (0..=count).map(|i| (log_lower + step * i as f64).exp()).collect();
        edges[0] = lower;
        edges[count] = upper;
        Ok(Self { edges })
    }

    /// Bins with explicit edges.
    pub fn from_edges(edges: Vec<f64>) -> Result<Self, ModelError> {
        if edges.len() < 2 {
            return Err(ModelError::InvalidSettings("at least two bin edges are required".to_string()));
        }
        if edges.iter().any(|e| !(*e > 0.0 && e.is_finite())) || edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ModelError::InvalidSettings(
                "bin edges must be positive and strictly increasing".to_string(),
            ));
        }
        Ok(Self { edges })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Representative IM of each bin, the geometric mean of its edges.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] * w[1]).sqrt()).collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
