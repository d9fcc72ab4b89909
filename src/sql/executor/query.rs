use crate::error::Result;
use crate::sql::engine::Engine;
use crate::sql::parser::ast::Condition;

use super::{Executor, ResultSet};

/// Table scan executor (plain SELECT)
///
/// Always returns full rows in storage order; the command's column spec was
/// already discarded by the parser.
pub struct Scan {
    table: String,
    filter: Option<Condition>,
}

impl Scan {
    pub fn new(table: String, filter: Option<Condition>) -> Box<Self> {
        Box::new(Self { table, filter })
    }
}

impl<E: Engine> Executor<E> for Scan {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet> {
        let Self { table, filter } = *self;
        engine.must_get_table(&table)?;

        let mut rows = engine.read_rows(&table);
        if let Some(condition) = &filter {
            rows.retain(|row| condition.matches(row));
        }
        Ok(ResultSet::Scan { rows })
    }
}
