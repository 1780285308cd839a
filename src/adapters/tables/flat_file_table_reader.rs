//! Flat-file Table Reader Adapter
//!
//! Reads comma-separated model files from disk.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use crate::domain::foundation::{ModelError, Table};
use crate::ports::{TableReadError, TableReader};

/// Reads tables from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatFileTableReader;

impl FlatFileTableReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TableReader for FlatFileTableReader {
    async fn read_table(&self, path: &Path) -> Result<Table, TableReadError> {
        if path.as_os_str().is_empty() {
            return Err(TableReadError::unreadable(path, "empty path"));
        }

        let bytes = fs::read(path)
            .await
            .map_err(|e| TableReadError::unreadable(path, e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|e| ModelError::MalformedTable {
            table: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let table = Table::parse(path.display().to_string(), &text)?;
        tracing::debug!(path = %path.display(), rows = table.rows.len(), "Table read");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_rows_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tree.txt");
        fs::write(&path, "TOP,AND,A,B\n\n# comment\nB,OR,C,D\n").await.unwrap();

        let table = FlatFileTableReader::new().read_table(&path).await.unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].key(), "B");
    }

    #[tokio::test]
    async fn missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let err = FlatFileTableReader::new()
            .read_table(&dir.path().join("absent.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, TableReadError::Unreadable { .. }));
        assert_eq!(err.to_string(), "Unable to open file.");
    }

    #[tokio::test]
    async fn empty_path_is_unreadable() {
        let err = FlatFileTableReader::new().read_table(Path::new("")).await.unwrap_err();
        assert!(matches!(err, TableReadError::Unreadable { .. }));
    }

    #[tokio::test]
    async fn invalid_utf8_is_malformed_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prob.txt");
        fs::write(&path, b"A,PE,0.1\n\xff\xfe,PE,0.2\n").await.unwrap();

        let err = FlatFileTableReader::new().read_table(&path).await.unwrap_err();
        assert!(matches!(err, TableReadError::Malformed(ModelError::MalformedTable { .. })));
    }
}
