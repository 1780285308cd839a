//! Input file configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Paths of the model input files
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputsConfig {
    /// Fault-tree gate file
    #[serde(default)]
    pub fault_tree: String,

    /// Event-tree sequence file
    #[serde(default)]
    pub sequences: String,

    /// Basic-event probability file
    #[serde(default)]
    pub probabilities: String,

    /// Common-cause group list
    pub ccf_list: Option<String>,

    /// Alpha factors per common-cause group
    pub ccf_alphas: Option<String>,

    /// Sequences each common-cause group applies to
    pub ccf_detail: Option<String>,

    /// Seismic hazard curve
    pub hazard: Option<String>,
}

impl InputsConfig {
    /// Validate input configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fault_tree.trim().is_empty() {
            return Err(ValidationError::MissingRequired("inputs.fault_tree"));
        }
        if self.sequences.trim().is_empty() {
            return Err(ValidationError::MissingRequired("inputs.sequences"));
        }
        if self.probabilities.trim().is_empty() {
            return Err(ValidationError::MissingRequired("inputs.probabilities"));
        }
        match (&self.ccf_list, &self.ccf_alphas) {
            (Some(_), None) => Err(ValidationError::MissingRequired("inputs.ccf_alphas")),
            (None, Some(_)) => Err(ValidationError::MissingRequired("inputs.ccf_list")),
            _ => Ok(()),
        }
    }
}
