//! Analysis mode shared by loading and quantification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ModelError;

/// What a run computes for each sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnalysisMode {
    /// Basic events carry failure probabilities directly.
    #[default]
    Risk,
    /// Basic events carry fragility curves convolved with a hazard curve.
    Fragility,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Risk => "RISK",
            AnalysisMode::Fragility => "FRAGILITY",
        }
    }
}

impl FromStr for AnalysisMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RISK" => Ok(AnalysisMode::Risk),
            "FRAGILITY" => Ok(AnalysisMode::Fragility),
            other => Err(ModelError::InvalidSettings(format!(
                "unknown analysis mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
