//! Report Writer Port - Interface for persisting quantification results.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::quantification::QuantificationResult;

/// Errors that can occur while writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportWriteError {
    #[error("Failed to serialize report: {0}")]
    SerializationFailed(String),

    #[error("IO error at {path}: {reason}")]
    IoError { path: PathBuf, reason: String },
}

/// Port for writing quantification results
#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Write every sequence of `result`
    ///
    /// # Returns
    /// The paths of the files written
    ///
    /// # Errors
    /// Returns `ReportWriteError` if any file cannot be written
    async fn write_report(&self, result: &QuantificationResult) -> Result<Vec<PathBuf>, ReportWriteError>;
}
