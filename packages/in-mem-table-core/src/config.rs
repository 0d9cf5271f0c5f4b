//! Table configuration.

/// Default row capacity used when a table is created with capacity 0.
pub const INITIAL_ROW_CAPACITY: usize = 100;

/// Default column directory capacity.
pub const INITIAL_COLUMN_CAPACITY: usize = 10;

/// Bound on table and column name storage, including the terminator slot.
/// Names keep at most `MAX_NAME_LEN - 1` characters.
pub const MAX_NAME_LEN: usize = 100;

/// Table configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Row capacity used when `create` is asked for 0 rows
    pub initial_row_capacity: usize,
    /// Initial column directory capacity
    pub initial_column_capacity: usize,
    /// Maximum row buffer size in bytes (default: unlimited)
    pub max_buffer_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_row_capacity: INITIAL_ROW_CAPACITY,
            initial_column_capacity: INITIAL_COLUMN_CAPACITY,
            max_buffer_size: usize::MAX,
        }
    }
}

/// Truncates `name` to the bounded name length on a character boundary.
pub(crate) fn bounded_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN - 1).collect()
}
