//! Database ID type definition.

/// Alias for the integer type SQLite assigns to operation rows.
pub type OperationId = i64;
