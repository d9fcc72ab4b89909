use std::path::Path;

use crate::error::Result;
use crate::sql::schema::{Catalog, TableSchema};
use crate::sql::types::Row;
use crate::storage::rowfile::RowStore;

use super::Engine;

/// The durable engine: a catalog plus per-table row files, all inside one
/// storage directory
///
/// Files remain after the process exits; there is no teardown.
pub struct FileEngine {
    catalog: Catalog,
    store: RowStore,
}

impl FileEngine {
    /// Opens a storage directory, initializing it when absent
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            catalog: Catalog::load(dir)?,
            store: RowStore::new(dir),
        })
    }
}

impl Engine for FileEngine {
    fn create_table(&mut self, name: String, schema: TableSchema) -> Result<()> {
        // Catalog entry and empty row file appear together
        self.catalog.define(name.clone(), schema)?;
        self.store.write(&name, &[])
    }

    fn get_table(&self, name: &str) -> Option<TableSchema> {
        self.catalog.get(name).ok().cloned()
    }

    fn read_rows(&self, table: &str) -> Vec<Row> {
        self.store.read(table)
    }

    fn write_rows(&mut self, table: &str, rows: &[Row]) -> Result<()> {
        self.store.write(table, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::FileEngine;
    use crate::error::Result;
    use crate::sql::engine::{Engine, Output, Session};

    fn msg(session: &mut Session<FileEngine>, command: &str) -> String {
        match session.execute(command) {
            Output::Message(m) => m,
            Output::Rows(rows) => panic!("expected message, got {} rows", rows.len()),
        }
    }

    #[test]
    fn test_rows_survive_reopen_in_insertion_order() -> Result<()> {
        let dir = tempfile::tempdir()?;

        let mut s = FileEngine::open(dir.path())?.session();
        msg(&mut s, "CREATE TABLE users (id int PK, name text)");
        msg(&mut s, "INSERT INTO users VALUES (2, 'Bob')");
        msg(&mut s, "INSERT INTO users VALUES (1, 'Alice')");
        drop(s);

        // A fresh session against the same directory sees the same rows,
        // in insertion order
        let mut s = FileEngine::open(dir.path())?.session();
        match s.execute("SELECT * FROM users") {
            Output::Rows(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].get("name"), Some(&"Bob".to_string()));
                assert_eq!(rows[1].get("name"), Some(&"Alice".to_string()));
            }
            Output::Message(m) => panic!("expected rows, got: {}", m),
        }
        Ok(())
    }

    #[test]
    fn test_persisted_layout() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut s = FileEngine::open(dir.path())?.session();
        msg(&mut s, "CREATE TABLE users (id int PK, name text UNIQUE)");
        msg(&mut s, "INSERT INTO users VALUES (1, 'Alice')");

        let catalog: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("schema.json"))?)?;
        assert_eq!(catalog["users"]["columns"]["id"], "int");
        assert_eq!(catalog["users"]["pk"], "id");
        assert_eq!(catalog["users"]["unique"][0], "name");

        let rows: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("users.json"))?)?;
        assert_eq!(rows[0]["id"], "1");
        assert_eq!(rows[0]["name"], "Alice");
        Ok(())
    }

    #[test]
    fn test_create_over_existing_table_truncates() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut s = FileEngine::open(dir.path())?.session();
        msg(&mut s, "CREATE TABLE t (a text)");
        msg(&mut s, "INSERT INTO t VALUES ('x')");
        // Re-creating replaces the schema and empties the row file
        assert_eq!(msg(&mut s, "CREATE TABLE t (b text)"), "Table 't' created.");
        match s.execute("SELECT * FROM t") {
            Output::Rows(rows) => assert!(rows.is_empty()),
            Output::Message(m) => panic!("expected rows, got: {}", m),
        }
        Ok(())
    }

    #[test]
    fn test_delete_missing_table_creates_empty_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut s = FileEngine::open(dir.path())?.session();
        assert_eq!(
            msg(&mut s, "DELETE FROM ghosts WHERE id=1"),
            "Deleted 0 rows."
        );
        // The unconditional rewrite creates the file for the unknown table
        assert!(dir.path().join("ghosts.json").exists());
        Ok(())
    }
}
