//! Quantification Module - Estimators, importance measures and per-sequence results.
//!
//! # Estimators
//!
//! - `min_max` - exact inclusion-exclusion over minimal cut sets
//! - `upper_bound` - min-cut upper bound
//! - `rare_event` - sum of cut-set probabilities

mod estimators;
mod importance;
mod quantifier;
mod result;
mod settings;
mod stats;

pub use estimators::{Estimators, Triple};
pub use importance::{ImportanceAnalyzer, ImportanceMeasures};
pub use quantifier::{Quantifier, SequenceInput};
pub use result::{
    BasicEventImportance, CutSetRecord, HazardBin, HazardIntegration, Metric, QuantificationResult,
    SequenceResult,
};
pub use settings::QuantificationSettings;
pub use stats::{Summary, SENTINEL};
