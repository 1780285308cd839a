//! Quantification settings.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalysisMode, ModelError};
use crate::domain::hazard::IntensityBins;

/// Controls for one quantification run, echoed into every sequence result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantificationSettings {
    pub analysis: AnalysisMode,
    pub im_lower: f64,
    pub im_upper: f64,
    pub nbins: usize,
    /// Explicit bin edges; overrides `im_lower`, `im_upper` and `nbins`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub im_edges: Option<Vec<f64>>,
    pub uncertainty: bool,
    pub nsamp: usize,
    pub seed: u64,
}

impl Default for QuantificationSettings {
    fn default() -> Self {
        Self {
            analysis: AnalysisMode::Risk,
            im_lower: 0.1,
            im_upper: 4.0,
            nbins: 15,
            im_edges: None,
            uncertainty: false,
            nsamp: 1,
            seed: 0,
        }
    }
}

impl QuantificationSettings {
    /// Checks the settings before any input is read.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.uncertainty && self.nsamp == 0 {
            return Err(ModelError::InvalidSettings(
                "uncertainty propagation needs nsamp >= 1".to_string(),
            ));
        }
        if self.analysis == AnalysisMode::Fragility {
            self.bins()?;
        }
        Ok(())
    }

    /// Intensity-measure bins of a fragility run.
    pub fn bins(&self) -> Result<IntensityBins, ModelError> {
        match &self.im_edges {
            Some(edges) => IntensityBins::from_edges(edges.clone()),
            None => IntensityBins::log_spaced(self.im_lower, self.im_upper, self.nbins),
        }
    }

    /// Number of resampled realisations beyond the point estimate.
    pub fn sample_count(&self) -> usize {
        if self.uncertainty {
            self.nsamp
        } else {
            0
        }
    }
}
