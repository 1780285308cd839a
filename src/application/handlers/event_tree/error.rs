//! Errors of an event-tree analysis run.

use std::path::PathBuf;

use crate::domain::foundation::{ErrorCode, ModelError};
use crate::ports::TableReadError;

/// Why an ETA run failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EtaError {
    /// A required path is missing or empty, or a given path cannot be read.
    #[error("Unable to open file.")]
    File { path: PathBuf, reason: String },

    /// Input content is malformed or inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ModelError),
}

impl EtaError {
    pub fn file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn is_file_error(&self) -> bool {
        matches!(self, EtaError::File { .. })
    }

    /// The model error code, for configuration errors.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            EtaError::File { .. } => None,
            EtaError::Configuration(e) => Some(e.code()),
        }
    }
}

impl From<TableReadError> for EtaError {
    fn from(err: TableReadError) -> Self {
        match err {
            TableReadError::Unreadable { path, reason } => EtaError::File { path, reason },
            TableReadError::Malformed(e) => EtaError::Configuration(e),
        }
    }
}
