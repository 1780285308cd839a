//! Table Reader Port - Interface for loading model input tables.
//!
//! Model files are flat comma-separated text; a reader fetches one file
//! and parses it into a [`Table`].

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::foundation::{ModelError, Table};

/// Errors that can occur while reading an input table
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableReadError {
    /// The file is missing, unnamed or cannot be read.
    #[error("Unable to open file.")]
    Unreadable { path: PathBuf, reason: String },

    /// The file was read but its content is malformed.
    #[error(transparent)]
    Malformed(#[from] ModelError),
}

impl TableReadError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Port for reading model input tables
#[async_trait]
pub trait TableReader: Send + Sync {
    /// Read and parse the table stored at `path`
    ///
    /// # Errors
    /// - `Unreadable` if the file cannot be opened
    /// - `Malformed` if the content cannot be parsed
    async fn read_table(&self, path: &Path) -> Result<Table, TableReadError>;
}
