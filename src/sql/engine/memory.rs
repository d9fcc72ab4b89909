use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::Result;
use crate::sql::schema::TableSchema;
use crate::sql::types::Row;

use super::Engine;

/// In-memory engine
///
/// Backs executor tests; mirrors the file engine's permissive
/// read-missing-as-empty behavior.
pub struct MemoryEngine {
    tables: IndexMap<String, TableSchema>,
    rows: HashMap<String, Vec<Row>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self {
            tables: IndexMap::new(),
            rows: HashMap::new(),
        }
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MemoryEngine {
    fn create_table(&mut self, name: String, schema: TableSchema) -> Result<()> {
        self.rows.insert(name.clone(), Vec::new());
        self.tables.insert(name, schema);
        Ok(())
    }

    fn get_table(&self, name: &str) -> Option<TableSchema> {
        self.tables.get(name).cloned()
    }

    fn read_rows(&self, table: &str) -> Vec<Row> {
        self.rows.get(table).cloned().unwrap_or_default()
    }

    fn write_rows(&mut self, table: &str, rows: &[Row]) -> Result<()> {
        self.rows.insert(table.to_string(), rows.to_vec());
        Ok(())
    }
}
