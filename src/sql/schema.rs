use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Catalog file name inside the storage directory
const CATALOG_FILE: &str = "schema.json";

/// Table schema definition
///
/// Column types are descriptive labels only; nothing casts or checks values
/// against them. `unique` records declared intent but is not enforced
/// anywhere - only the primary key is checked, and only on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Declared columns in declaration order, name to type label
    pub columns: IndexMap<String, String>,
    /// Primary key column, at most one per table
    pub pk: Option<String>,
    /// Columns declared UNIQUE, in declaration order
    pub unique: Vec<String>,
}

/// In-memory table catalog, durably mirrored to `schema.json` in the
/// storage directory
///
/// The catalog is loaded once at construction and rewritten wholesale on
/// every schema change.
#[derive(Debug)]
pub struct Catalog {
    tables: IndexMap<String, TableSchema>,
    path: PathBuf,
}

impl Catalog {
    /// Loads the catalog from a storage directory, creating the directory
    /// and an empty catalog file when absent
    pub fn load(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let mut catalog = Self {
            tables: IndexMap::new(),
            path: dir.join(CATALOG_FILE),
        };
        if catalog.path.exists() {
            let data = fs::read_to_string(&catalog.path)?;
            catalog.tables = serde_json::from_str(&data)?;
        } else {
            catalog.save()?;
        }
        Ok(catalog)
    }

    /// Rewrites the whole catalog file
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_string(&self.tables)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    /// Whether a table is defined
    pub fn exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Adds a table definition and persists the catalog; an existing entry
    /// under the same name is silently replaced
    pub fn define(&mut self, name: String, schema: TableSchema) -> Result<()> {
        debug!(table = name.as_str(), "defining table");
        self.tables.insert(name, schema);
        self.save()
    }

    /// Looks up a table definition
    pub fn get(&self, name: &str) -> Result<&TableSchema> {
        self.tables.get(name).ok_or(Error::TableNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, TableSchema, CATALOG_FILE};
    use crate::error::{Error, Result};

    fn users_schema() -> TableSchema {
        TableSchema {
            columns: [("id", "int"), ("name", "text")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            pk: Some("id".to_string()),
            unique: vec![],
        }
    }

    #[test]
    fn test_catalog_initializes_empty_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let catalog = Catalog::load(dir.path())?;
        assert!(!catalog.exists("users"));
        // The metadata file appears even before any table is defined
        assert!(dir.path().join(CATALOG_FILE).exists());
        Ok(())
    }

    #[test]
    fn test_catalog_define_and_reload() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut catalog = Catalog::load(dir.path())?;
        catalog.define("users".to_string(), users_schema())?;

        let reloaded = Catalog::load(dir.path())?;
        assert!(reloaded.exists("users"));
        assert_eq!(reloaded.get("users")?, &users_schema());
        assert_eq!(reloaded.get("ghosts"), Err(Error::TableNotFound));
        Ok(())
    }

    #[test]
    fn test_catalog_define_replaces_silently() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut catalog = Catalog::load(dir.path())?;
        catalog.define("users".to_string(), users_schema())?;

        let replacement = TableSchema {
            columns: [("id".to_string(), "text".to_string())].into_iter().collect(),
            pk: None,
            unique: vec![],
        };
        catalog.define("users".to_string(), replacement.clone())?;
        assert_eq!(catalog.get("users")?, &replacement);
        Ok(())
    }
}
