//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },
}

impl ValidationError {
    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }
}

/// Error codes for malformed model content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedTable,
    RowArity,
    InvalidNumber,
    UnknownGateType,
    UnknownDistribution,
    CyclicGate,
    DuplicateDefinition,
    UnknownReference,
    MissingProbability,
    InvalidParameter,
    UnresolvedCcfReference,
    InvalidSettings,
    ValidationFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MalformedTable => "MALFORMED_TABLE",
            ErrorCode::RowArity => "ROW_ARITY",
            ErrorCode::InvalidNumber => "INVALID_NUMBER",
            ErrorCode::UnknownGateType => "UNKNOWN_GATE_TYPE",
            ErrorCode::UnknownDistribution => "UNKNOWN_DISTRIBUTION",
            ErrorCode::CyclicGate => "CYCLIC_GATE",
            ErrorCode::DuplicateDefinition => "DUPLICATE_DEFINITION",
            ErrorCode::UnknownReference => "UNKNOWN_REFERENCE",
            ErrorCode::MissingProbability => "MISSING_PROBABILITY",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::UnresolvedCcfReference => "UNRESOLVED_CCF_REFERENCE",
            ErrorCode::InvalidSettings => "INVALID_SETTINGS",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
        };
        write!(f, "{}", s)
    }
}

/// Malformed model content. Any of these aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{table}: {reason}")]
    MalformedTable { table: String, reason: String },

    #[error("{table}:{line}: expected {expected} fields, found {found}")]
    RowArity {
        table: String,
        line: u64,
        expected: String,
        found: usize,
    },

    #[error("{table}:{line}: '{value}' is not a number")]
    InvalidNumber {
        table: String,
        line: u64,
        value: String,
    },

    #[error("{table}:{line}: unknown gate type '{kind}' for gate '{gate}'")]
    UnknownGateType {
        table: String,
        line: u64,
        gate: String,
        kind: String,
    },

    #[error("{table}:{line}: unknown distribution '{tag}' for basic event '{event}'")]
    UnknownDistribution {
        table: String,
        line: u64,
        event: String,
        tag: String,
    },

    #[error("cyclic gate reference: {}", path.join(" -> "))]
    CyclicGate { path: Vec<String> },

    #[error("'{name}' is defined more than once in {context}")]
    DuplicateDefinition { name: String, context: String },

    #[error("'{name}' referenced by {referenced_by} is not defined")]
    UnknownReference { name: String, referenced_by: String },

    #[error("no probability given for basic event '{event}'")]
    MissingProbability { event: String },

    #[error("invalid parameters for '{event}': {reason}")]
    InvalidParameter { event: String, reason: String },

    #[error("common-cause group '{group}': {reason}")]
    UnresolvedCcfReference { group: String, reason: String },

    #[error("invalid analysis settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ModelError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ModelError::MalformedTable { .. } => ErrorCode::MalformedTable,
            ModelError::RowArity { .. } => ErrorCode::RowArity,
            ModelError::InvalidNumber { .. } => ErrorCode::InvalidNumber,
            ModelError::UnknownGateType { .. } => ErrorCode::UnknownGateType,
            ModelError::UnknownDistribution { .. } => ErrorCode::UnknownDistribution,
            ModelError::CyclicGate { .. } => ErrorCode::CyclicGate,
            ModelError::DuplicateDefinition { .. } => ErrorCode::DuplicateDefinition,
            ModelError::UnknownReference { .. } => ErrorCode::UnknownReference,
            ModelError::MissingProbability { .. } => ErrorCode::MissingProbability,
            ModelError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            ModelError::UnresolvedCcfReference { .. } => ErrorCode::UnresolvedCcfReference,
            ModelError::InvalidSettings(_) => ErrorCode::InvalidSettings,
            ModelError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }

    /// Creates an invalid parameter error for a basic event.
    pub fn invalid_parameter(event: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::InvalidParameter {
            event: event.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unresolved common-cause reference error.
    pub fn ccf(group: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::UnresolvedCcfReference {
            group: group.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(name: impl Into<String>, context: impl Into<String>) -> Self {
        ModelError::DuplicateDefinition {
            name: name.into(),
            context: context.into(),
        }
    }
}
