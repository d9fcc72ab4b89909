use crate::sql::types::Row;

/// Typed command representation, one variant per recognized kind
#[derive(Debug, PartialEq)]
pub enum Statement {
    /// CREATE TABLE
    CreateTable {
        name: String,
        columns: Vec<ColumnDef>,
    },
    /// INSERT INTO, literals already rendered as text
    Insert { table: String, values: Vec<String> },
    /// Plain SELECT; the column spec is consumed by the parser and
    /// discarded, full rows are always returned
    Select {
        table: String,
        filter: Option<Condition>,
    },
    /// Two-table equi-join SELECT
    Join {
        left: String,
        right: String,
        left_col: String,
        right_col: String,
    },
    /// UPDATE with a single assignment; WHERE is mandatory
    Update {
        table: String,
        column: String,
        value: String,
        filter: Condition,
    },
    /// DELETE FROM; WHERE is mandatory
    Delete { table: String, filter: Condition },
}

/// Column definition in CREATE TABLE
#[derive(Debug, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    /// Declared type label, stored verbatim and never enforced
    pub datatype: String,
    pub primary_key: bool,
    pub unique: bool,
}

/// Comparison operators allowed in a WHERE clause
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operator {
    Equal,
    GreaterThan,
    LessThan,
}

/// A single binary comparison: `column <op> literal`
#[derive(Debug, PartialEq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub value: String,
}

impl Condition {
    /// Evaluates the comparison against a row
    ///
    /// An absent column reads as the empty string. `>`/`<` compare the text
    /// lexicographically, never numerically: "9" > "10" because "9" > "1"
    /// byte-wise.
    pub fn matches(&self, row: &Row) -> bool {
        let row_val = row.get(&self.column).map(String::as_str).unwrap_or("");
        match self.operator {
            Operator::Equal => row_val == self.value,
            Operator::GreaterThan => row_val > self.value.as_str(),
            Operator::LessThan => row_val < self.value.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Condition, Operator};
    use crate::sql::types::Row;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn cond(column: &str, operator: Operator, value: &str) -> Condition {
        Condition {
            column: column.to_string(),
            operator,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_equality_is_text() {
        let r = row(&[("id", "1"), ("name", "Alice")]);
        assert!(cond("id", Operator::Equal, "1").matches(&r));
        assert!(!cond("id", Operator::Equal, "01").matches(&r));
        assert!(cond("name", Operator::Equal, "Alice").matches(&r));
    }

    #[test]
    fn test_absent_column_reads_empty() {
        let r = row(&[("id", "1")]);
        assert!(!cond("missing", Operator::Equal, "1").matches(&r));
        assert!(cond("missing", Operator::Equal, "").matches(&r));
        // "" is less than any non-empty value
        assert!(cond("missing", Operator::LessThan, "a").matches(&r));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let r9 = row(&[("id", "9")]);
        let r10 = row(&[("id", "10")]);
        let r2 = row(&[("id", "2")]);
        // "9" < "10" is false: "9" > "1" byte-wise
        assert!(!cond("id", Operator::LessThan, "10").matches(&r9));
        assert!(cond("id", Operator::GreaterThan, "10").matches(&r9));
        // id > 10 keeps "2" but not "10"
        assert!(cond("id", Operator::GreaterThan, "10").matches(&r2));
        assert!(!cond("id", Operator::GreaterThan, "10").matches(&r10));
    }
}
