use tracing::debug;

use crate::error::{Error, Result};
use crate::sql::executor::{Executor, ResultSet};
use crate::sql::parser::Parser;
use crate::sql::schema::TableSchema;
use crate::sql::types::Row;

mod file;
mod memory;

pub use file::FileEngine;
pub use memory::MemoryEngine;

/// Storage seam between the executors and the persisted state
///
/// Every operation re-reads the backing store and rewrites it wholesale;
/// nothing caches table state across calls and nothing locks. Concurrent
/// access to one storage directory must be serialized by the caller.
pub trait Engine {
    /// Registers a table schema and initializes its empty row storage.
    /// An existing entry is silently replaced and its rows truncated.
    fn create_table(&mut self, name: String, schema: TableSchema) -> Result<()>;

    /// Looks up a table definition
    fn get_table(&self, name: &str) -> Option<TableSchema>;

    /// Returns the table definition, failing if it is absent
    fn must_get_table(&self, name: &str) -> Result<TableSchema> {
        self.get_table(name).ok_or(Error::TableNotFound)
    }

    /// Reads the full row sequence; a missing store reads as empty
    fn read_rows(&self, table: &str) -> Vec<Row>;

    /// Rewrites the full row sequence, replacing prior content
    fn write_rows(&mut self, table: &str, rows: &[Row]) -> Result<()>;

    /// Wraps the engine in a command session
    fn session(self) -> Session<Self>
    where
        Self: Sized,
    {
        Session { engine: self }
    }
}

/// What a caller gets back from `execute`: result rows for a successful
/// SELECT, a status message for everything else (including every failure)
#[derive(Debug, PartialEq)]
pub enum Output {
    Rows(Vec<Row>),
    Message(String),
}

/// Command session - the single entry point external collaborators call
///
/// Stateless across calls except for catalog and storage reads/writes.
pub struct Session<E: Engine> {
    engine: E,
}

impl<E: Engine + 'static> Session<E> {
    /// Executes one command
    ///
    /// Never fails: every error is converted into a status message here, so
    /// callers only inspect the output shape.
    pub fn execute(&mut self, command: &str) -> Output {
        debug!(command, "executing");
        match self.try_execute(command) {
            Ok(ResultSet::Scan { rows }) => Output::Rows(rows),
            Ok(ResultSet::CreateTable { table_name }) => {
                Output::Message(format!("Table '{}' created.", table_name))
            }
            Ok(ResultSet::Insert) => Output::Message("Row inserted.".to_string()),
            Ok(ResultSet::Update { count }) => {
                Output::Message(format!("Updated {} rows.", count))
            }
            Ok(ResultSet::Delete { count }) => {
                Output::Message(format!("Deleted {} rows.", count))
            }
            Err(err) => Output::Message(err.to_string()),
        }
    }

    fn try_execute(&mut self, command: &str) -> Result<ResultSet> {
        let stmt = Parser::new(command).parse()?;
        <dyn Executor<E>>::build(stmt).execute(&mut self.engine)
    }
}
