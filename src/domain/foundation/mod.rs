//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, input tables and error types
//! that form the vocabulary of the risk model.

mod analysis_mode;
mod errors;
mod ids;
mod probability;
mod table;
mod timestamp;

pub use analysis_mode::AnalysisMode;
pub use errors::{ErrorCode, ModelError, ValidationError};
pub use ids::{EventId, RunId};
pub use probability::Probability;
pub use table::{Table, TableRow};
pub use timestamp::Timestamp;
