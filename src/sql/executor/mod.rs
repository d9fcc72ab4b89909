use crate::error::Result;
use crate::sql::engine::Engine;
use crate::sql::executor::join::NestedLoopJoin;
use crate::sql::executor::mutation::{Delete, Insert, Update};
use crate::sql::executor::query::Scan;
use crate::sql::executor::schema::CreateTable;
use crate::sql::parser::ast::Statement;
use crate::sql::types::Row;

mod join;
mod mutation;
mod query;
mod schema;

/// Statement executor trait
pub trait Executor<E: Engine> {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet>;
}

/// Builds an executor straight from the parsed statement
///
/// There is no planning layer: each command kind maps to exactly one
/// handler. The `'static` bound is required for trait object usage.
impl<E: Engine + 'static> dyn Executor<E> {
    pub fn build(stmt: Statement) -> Box<dyn Executor<E>> {
        match stmt {
            Statement::CreateTable { name, columns } => CreateTable::new(name, columns),
            Statement::Insert { table, values } => Insert::new(table, values),
            Statement::Select { table, filter } => Scan::new(table, filter),
            Statement::Join {
                left,
                right,
                left_col,
                right_col,
            } => NestedLoopJoin::new(left, right, left_col, right_col),
            Statement::Update {
                table,
                column,
                value,
                filter,
            } => Update::new(table, column, value, filter),
            Statement::Delete { table, filter } => Delete::new(table, filter),
        }
    }
}

/// Execution result set
///
/// `Session::execute` renders the non-Scan variants as their status text.
#[derive(Debug, PartialEq)]
pub enum ResultSet {
    CreateTable { table_name: String },
    Insert,
    Scan { rows: Vec<Row> },
    Update { count: usize },
    Delete { count: usize },
}
