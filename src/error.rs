use std::fmt::Display;

/// Custom Result type for flatdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for flatdb
///
/// `Display` renders each variant as the exact status text callers see.
/// No variant ever escapes `Session::execute`; every failure becomes a
/// returned message at that boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Grammar mismatch; nothing was mutated
    Syntax,
    /// Leading keyword did not match any command kind
    Unrecognized,
    /// Join grammar mismatch
    Join,
    /// Referenced table is not in the catalog
    TableNotFound,
    /// INSERT value count differs from the table's column count
    ColumnMismatch,
    /// Duplicate primary key value on insert, carrying the offending value
    Constraint(String),
    /// Any other failure (I/O, serialization), reported generically
    Runtime(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Runtime(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Runtime(value.to_string())
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax => write!(f, "Syntax Error."),
            Error::Unrecognized => write!(f, "Syntax Error: Command not recognized."),
            Error::Join => write!(f, "Join Error."),
            Error::TableNotFound => write!(f, "Table not found."),
            Error::ColumnMismatch => write!(f, "Column mismatch."),
            Error::Constraint(value) => write!(f, "Constraint Violation: PK '{}' exists.", value),
            Error::Runtime(msg) => write!(f, "Runtime Error: {}", msg),
        }
    }
}
