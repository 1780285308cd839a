//! Analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::AnalysisMode;

/// Quantification controls
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// "RISK" or "FRAGILITY", case-insensitive
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Lower intensity-measure bound of the hazard bins
    #[serde(default = "default_im_lower")]
    pub im_lower: f64,

    /// Upper intensity-measure bound of the hazard bins
    #[serde(default = "default_im_upper")]
    pub im_upper: f64,

    /// Number of log-spaced hazard bins
    #[serde(default = "default_nbins")]
    pub nbins: usize,

    /// Explicit bin edges (comma-separated); overrides the bounds and count
    pub im_edges: Option<String>,

    /// Propagate parameter uncertainty by sampling
    #[serde(default)]
    pub uncertainty: bool,

    /// Samples per sequence when propagating uncertainty
    #[serde(default = "default_nsamp")]
    pub nsamp: usize,

    /// Seed of the sampling stream
    #[serde(default)]
    pub seed: u64,
}

impl AnalysisConfig {
    /// Parsed analysis mode
    pub fn analysis_mode(&self) -> Result<AnalysisMode, ValidationError> {
        self.mode
            .parse()
            .map_err(|_| ValidationError::InvalidAnalysisMode(self.mode.clone()))
    }

    /// Parsed explicit bin edges
    pub fn edges(&self) -> Result<Option<Vec<f64>>, ValidationError> {
        let Some(raw) = &self.im_edges else {
            return Ok(None);
        };
        let edges = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>()
                    .map_err(|_| ValidationError::InvalidImEdges(format!("'{}' is not a number", s)))
            })
            .collect::<Result<Vec<f64>, _>>()?;
        if edges.len() < 2 {
            return Err(ValidationError::InvalidImEdges("need at least two edges".to_string()));
        }
        if edges[0] <= 0.0 || edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ValidationError::InvalidImEdges(
                "edges must be positive and strictly increasing".to_string(),
            ));
        }
        Ok(Some(edges))
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analysis_mode()?;
        if self.edges()?.is_none() {
            if !(self.im_lower > 0.0 && self.im_lower < self.im_upper) {
                return Err(ValidationError::InvalidImRange);
            }
            if self.nbins == 0 {
                return Err(ValidationError::InvalidBinCount);
            }
        }
        if self.uncertainty && self.nsamp == 0 {
            return Err(ValidationError::InvalidSampleCount);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            im_lower: default_im_lower(),
            im_upper: default_im_upper(),
            nbins: default_nbins(),
            im_edges: None,
            uncertainty: false,
            nsamp: default_nsamp(),
            seed: 0,
        }
    }
}

fn default_mode() -> String {
    "RISK".to_string()
}

fn default_im_lower() -> f64 {
    0.1
}

fn default_im_upper() -> f64 {
    4.0
}

fn default_nbins() -> usize {
    15
}

fn default_nsamp() -> usize {
    1
}
