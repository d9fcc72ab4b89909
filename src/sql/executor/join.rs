use crate::error::Result;
use crate::sql::engine::Engine;

use super::{Executor, ResultSet};

/// Nested-loop equi-join executor over two tables
///
/// Neither side is checked against the catalog: a missing table reads as an
/// empty sequence and simply contributes no pairs.
pub struct NestedLoopJoin {
    left: String,
    right: String,
    left_col: String,
    right_col: String,
}

impl NestedLoopJoin {
    pub fn new(left: String, right: String, left_col: String, right_col: String) -> Box<Self> {
        Box::new(Self {
            left,
            right,
            left_col,
            right_col,
        })
    }
}

impl<E: Engine> Executor<E> for NestedLoopJoin {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet> {
        let Self {
            left,
            right,
            left_col,
            right_col,
        } = *self;

        let left_rows = engine.read_rows(&left);
        let right_rows = engine.read_rows(&right);

        let mut rows = Vec::new();
        for lrow in &left_rows {
            for rrow in &right_rows {
                // Keyed lookup on both sides; two absent keys compare equal
                if lrow.get(&left_col) != rrow.get(&right_col) {
                    continue;
                }
                // Left row overlaid with the right row; on a shared column
                // name the right-hand value wins
                let mut row = lrow.clone();
                for (key, value) in rrow {
                    row.insert(key.clone(), value.clone());
                }
                rows.push(row);
            }
        }
        Ok(ResultSet::Scan { rows })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Result;
    use crate::sql::engine::{Engine, MemoryEngine};
    use crate::sql::executor::{Executor, ResultSet};
    use crate::sql::parser::Parser;

    fn run(engine: &mut MemoryEngine, command: &str) -> Result<ResultSet> {
        <dyn Executor<MemoryEngine>>::build(Parser::new(command).parse()?).execute(engine)
    }

    #[test]
    fn test_right_value_wins_on_shared_column() -> Result<()> {
        let mut engine = MemoryEngine::new();
        run(&mut engine, "CREATE TABLE a (id int, tag text)")?;
        run(&mut engine, "CREATE TABLE b (id int, tag text)")?;
        run(&mut engine, "INSERT INTO a VALUES (1, 'left')")?;
        run(&mut engine, "INSERT INTO b VALUES (1, 'right')")?;

        let result = run(&mut engine, "SELECT * FROM a JOIN b ON a.id = b.id")?;
        let ResultSet::Scan { rows } = result else {
            panic!("expected scan result");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("tag"), Some(&"right".to_string()));
        Ok(())
    }

    #[test]
    fn test_missing_table_contributes_no_pairs() -> Result<()> {
        let mut engine = MemoryEngine::new();
        run(&mut engine, "CREATE TABLE a (id int)")?;
        run(&mut engine, "INSERT INTO a VALUES (1)")?;

        let result = run(&mut engine, "SELECT * FROM a JOIN ghosts ON a.id = ghosts.id")?;
        assert_eq!(result, ResultSet::Scan { rows: vec![] });
        Ok(())
    }
}
