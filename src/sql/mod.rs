//! Command processing module
//!
//! This module provides:
//! - `parser`: lexer, recursive-descent parser and the statement AST
//! - `types`: the row representation
//! - `schema`: catalog and table schema definitions
//! - `engine`: the storage seam and the command session
//! - `executor`: per-kind statement execution

pub mod engine;
pub mod executor;
pub mod parser;
pub mod schema;
pub mod types;
