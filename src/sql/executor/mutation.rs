use crate::error::{Error, Result};
use crate::sql::engine::Engine;
use crate::sql::parser::ast::Condition;
use crate::sql::types::Row;

use super::{Executor, ResultSet};

/// INSERT executor
pub struct Insert {
    table: String,
    values: Vec<String>,
}

impl Insert {
    pub fn new(table: String, values: Vec<String>) -> Box<Self> {
        Box::new(Self { table, values })
    }
}

impl<E: Engine> Executor<E> for Insert {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet> {
        let Self { table, values } = *self;
        let schema = engine.must_get_table(&table)?;

        if values.len() != schema.columns.len() {
            return Err(Error::ColumnMismatch);
        }
        // Zip declared column order with the literal list
        let row: Row = schema.columns.keys().cloned().zip(values).collect();

        let mut rows = engine.read_rows(&table);
        // Only the primary key is checked; UNIQUE declarations are not
        if let Some(pk) = &schema.pk {
            let pk_value = row.get(pk).cloned().unwrap_or_default();
            if rows.iter().any(|r| r.get(pk) == Some(&pk_value)) {
                return Err(Error::Constraint(pk_value));
            }
        }

        rows.push(row);
        engine.write_rows(&table, &rows)?;
        Ok(ResultSet::Insert)
    }
}

/// UPDATE executor - single assignment over every row matching the filter
pub struct Update {
    table: String,
    column: String,
    value: String,
    filter: Condition,
}

impl Update {
    pub fn new(table: String, column: String, value: String, filter: Condition) -> Box<Self> {
        Box::new(Self {
            table,
            column,
            value,
            filter,
        })
    }
}

impl<E: Engine> Executor<E> for Update {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet> {
        let Self {
            table,
            column,
            value,
            filter,
        } = *self;
        engine.must_get_table(&table)?;

        let mut rows = engine.read_rows(&table);
        let mut count = 0;
        for row in rows.iter_mut() {
            if filter.matches(row) {
                // Unchecked against the schema: an unknown column is created
                row.insert(column.clone(), value.clone());
                count += 1;
            }
        }

        engine.write_rows(&table, &rows)?;
        Ok(ResultSet::Update { count })
    }
}

/// DELETE executor
pub struct Delete {
    table: String,
    filter: Condition,
}

impl Delete {
    pub fn new(table: String, filter: Condition) -> Box<Self> {
        Box::new(Self { table, filter })
    }
}

impl<E: Engine> Executor<E> for Delete {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet> {
        let Self { table, filter } = *self;

        // No catalog check: a missing table reads as empty and the delete
        // reports zero rows instead of failing
        let rows = engine.read_rows(&table);
        let before = rows.len();
        let remaining: Vec<Row> = rows.into_iter().filter(|row| !filter.matches(row)).collect();
        let count = before - remaining.len();

        engine.write_rows(&table, &remaining)?;
        Ok(ResultSet::Delete { count })
    }
}
