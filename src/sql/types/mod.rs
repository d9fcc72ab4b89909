use indexmap::IndexMap;

/// A row is an ordered mapping from column name to value
///
/// Values are always text regardless of the declared column type; the
/// comparison operators work on that text directly. Iteration order is
/// insertion order, which is also the key order the row files persist.
pub type Row = IndexMap<String, String>;
