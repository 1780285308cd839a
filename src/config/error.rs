//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Unknown analysis mode: {0}")]
    InvalidAnalysisMode(String),

    #[error("Intensity range must satisfy 0 < im_lower < im_upper")]
    InvalidImRange,

    #[error("Bin count must be at least 1")]
    InvalidBinCount,

    #[error("Invalid intensity bin edges: {0}")]
    InvalidImEdges(String),

    #[error("Uncertainty propagation needs nsamp >= 1")]
    InvalidSampleCount,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
