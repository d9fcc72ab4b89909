//! flatdb - a minimal file-persisted relational store
//!
//! A constrained SQL-like command language drives five operations (CREATE
//! TABLE, INSERT, SELECT with optional two-table equi-join, UPDATE, DELETE)
//! against per-table JSON files. All values are stored and compared as
//! text; the catalog and every table file are rewritten wholesale on each
//! mutation. One caller at a time per storage directory.
//!
//! ```no_run
//! use flatdb::sql::engine::{Engine, FileEngine, Output};
//!
//! # fn main() -> flatdb::error::Result<()> {
//! let mut session = FileEngine::open("mydb")?.session();
//! session.execute("CREATE TABLE users (id int PK, name text)");
//! session.execute("INSERT INTO users VALUES (1, 'Alice')");
//! if let Output::Rows(rows) = session.execute("SELECT * FROM users") {
//!     assert_eq!(rows.len(), 1);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod sql;
pub mod storage;
