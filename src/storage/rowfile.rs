use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::sql::types::Row;

/// Per-table durable row storage
///
/// One JSON file per table inside the storage directory, holding the full
/// row sequence. Every mutation is a whole-file rewrite; there is no
/// append, no partial update and no locking.
#[derive(Debug, Clone)]
pub struct RowStore {
    dir: PathBuf,
}

impl RowStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.json", table))
    }

    /// Reads the full row sequence for a table
    ///
    /// A missing or unreadable file reads as an empty sequence; I/O and
    /// parse failures are masked identically.
    pub fn read(&self, table: &str) -> Vec<Row> {
        fs::read_to_string(self.table_path(table))
            .ok()
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default()
    }

    /// Rewrites the full row sequence, replacing any prior content
    pub fn write(&self, table: &str, rows: &[Row]) -> Result<()> {
        debug!(table, count = rows.len(), "rewriting row file");
        let data = serde_json::to_string_pretty(rows)?;
        fs::write(self.table_path(table), data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RowStore;
    use crate::error::Result;
    use crate::sql::types::Row;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_file_reads_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = RowStore::new(dir.path());
        assert!(store.read("nope").is_empty());
        Ok(())
    }

    #[test]
    fn test_corrupt_file_reads_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("users.json"), "not json {")?;
        let store = RowStore::new(dir.path());
        assert!(store.read("users").is_empty());
        Ok(())
    }

    #[test]
    fn test_write_then_read_preserves_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = RowStore::new(dir.path());
        let rows = vec![
            row(&[("id", "2"), ("name", "Bob")]),
            row(&[("id", "1"), ("name", "Alice")]),
        ];
        store.write("users", &rows)?;
        assert_eq!(store.read("users"), rows);

        // A rewrite replaces prior content outright
        store.write("users", &rows[..1])?;
        assert_eq!(store.read("users").len(), 1);
        Ok(())
    }
}
