use crate::error::Result;
use crate::sql::engine::Engine;
use crate::sql::parser::ast::ColumnDef;
use crate::sql::schema::TableSchema;

use super::{Executor, ResultSet};

/// CREATE TABLE executor
pub struct CreateTable {
    name: String,
    columns: Vec<ColumnDef>,
}

impl CreateTable {
    pub fn new(name: String, columns: Vec<ColumnDef>) -> Box<Self> {
        Box::new(Self { name, columns })
    }
}

impl<E: Engine> Executor<E> for CreateTable {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet> {
        let Self { name, columns } = *self;

        let mut schema = TableSchema::default();
        for column in columns {
            schema.columns.insert(column.name.clone(), column.datatype);
            // When several columns carry the PK flag, the last one wins
            if column.primary_key {
                schema.pk = Some(column.name.clone());
            }
            if column.unique {
                schema.unique.push(column.name);
            }
        }

        engine.create_table(name.clone(), schema)?;
        Ok(ResultSet::CreateTable { table_name: name })
    }
}
