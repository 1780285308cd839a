//! In-Memory Table Reader Adapter
//!
//! Serves table text registered under a path. Useful for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Table;
use crate::ports::{TableReadError, TableReader};

/// In-memory source of model tables
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableReader {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl InMemoryTableReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the text served for `path`
    pub async fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.write().await.insert(path.into(), text.into());
    }

    /// Builder-style variant of `insert` for synchronous setup
    pub fn with_file(self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.try_write() {
            files.insert(path.into(), text.into());
        }
        self
    }

    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl TableReader for InMemoryTableReader {
    async fn read_table(&self, path: &Path) -> Result<Table, TableReadError> {
        let files = self.files.read().await;
        let text = files
            .get(path)
            .ok_or_else(|| TableReadError::unreadable(path, "not registered"))?;
        Ok(Table::parse(path.display().to_string(), text)?)
    }
}
