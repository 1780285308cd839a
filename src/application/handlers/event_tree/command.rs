//! EtaCommand - Inputs of one event-tree analysis run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::foundation::{AnalysisMode, ModelError};
use crate::domain::quantification::QuantificationSettings;

/// Command to quantify every sequence of an event tree.
///
/// `analysis` is kept as given and parsed case-insensitively when the
/// command is handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaCommand {
    pub fault_tree_path: PathBuf,
    pub sequence_path: PathBuf,
    pub probability_path: PathBuf,
    pub ccf_list_path: Option<PathBuf>,
    pub ccf_alpha_path: Option<PathBuf>,
    pub ccf_detail_path: Option<PathBuf>,
    pub hazard_path: Option<PathBuf>,
    pub analysis: String,
    pub im_lower: f64,
    pub im_upper: f64,
    pub nbins: usize,
    pub im_edges: Option<Vec<f64>>,
    pub uncertainty: bool,
    pub nsamp: usize,
    pub seed: u64,
}

impl EtaCommand {
    /// A RISK run over the three required files with default controls.
    pub fn new(
        fault_tree_path: impl Into<PathBuf>,
        sequence_path: impl Into<PathBuf>,
        probability_path: impl Into<PathBuf>,
    ) -> Self {
        let defaults = QuantificationSettings::default();
        Self {
            fault_tree_path: fault_tree_path.into(),
            sequence_path: sequence_path.into(),
            probability_path: probability_path.into(),
            ccf_list_path: None,
            ccf_alpha_path: None,
            ccf_detail_path: None,
            hazard_path: None,
            analysis: defaults.analysis.to_string(),
            im_lower: defaults.im_lower,
            im_upper: defaults.im_upper,
            nbins: defaults.nbins,
            im_edges: None,
            uncertainty: defaults.uncertainty,
            nsamp: defaults.nsamp,
            seed: defaults.seed,
        }
    }

    pub fn with_analysis(mut self, analysis: impl Into<String>) -> Self {
        self.analysis = analysis.into();
        self
    }

    /// Adds the common-cause list, alpha-factor and optional detail files.
    pub fn with_ccf(
        mut self,
        list: impl Into<PathBuf>,
        alphas: impl Into<PathBuf>,
        detail: Option<PathBuf>,
    ) -> Self {
        self.ccf_list_path = Some(list.into());
        self.ccf_alpha_path = Some(alphas.into());
        self.ccf_detail_path = detail;
        self
    }

    pub fn with_hazard(mut self, path: impl Into<PathBuf>) -> Self {
        self.hazard_path = Some(path.into());
        self
    }

    pub fn with_bins(mut self, im_lower: f64, im_upper: f64, nbins: usize) -> Self {
        self.im_lower = im_lower;
        self.im_upper = im_upper;
        self.nbins = nbins;
        self
    }

    pub fn with_uncertainty(mut self, nsamp: usize, seed: u64) -> Self {
        self.uncertainty = true;
        self.nsamp = nsamp;
        self.seed = seed;
        self
    }

    /// Quantification settings, with the analysis mode parsed and checked.
    pub fn settings(&self) -> Result<QuantificationSettings, ModelError> {
        let settings = QuantificationSettings {
            analysis: self.analysis.parse::<AnalysisMode>()?,
            im_lower: self.im_lower,
            im_upper: self.im_upper,
            nbins: self.nbins,
            im_edges: self.im_edges.clone(),
            uncertainty: self.uncertainty,
            nsamp: self.nsamp,
            seed: self.seed,
        };
        settings.validate()?;
        Ok(settings)
    }
}
