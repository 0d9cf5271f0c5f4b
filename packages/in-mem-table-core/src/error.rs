//! Table error types.

use thiserror::Error;

/// Table operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Row size must be non-zero
    #[error("Invalid row size {row_size} for table '{table}'")]
    InvalidRowSize { table: String, row_size: usize },

    /// Row data length does not match the table's row size
    #[error("Row for table '{table}' is {got} bytes, expected {expected}")]
    RowSizeMismatch {
        table: String,
        expected: usize,
        got: usize,
    },

    /// Batch length is not a whole number of rows
    #[error("Batch of {len} bytes is not a multiple of row size {row_size} in table '{table}'")]
    BatchSizeMismatch {
        table: String,
        len: usize,
        row_size: usize,
    },

    /// Column not found in table
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Column directory failed validation
    #[error("Invalid column '{column}' in table '{table}': {reason}")]
    InvalidColumn {
        table: String,
        column: String,
        reason: String,
    },

    /// Unrecognised column type tag
    #[error("Unknown column type '{0}'")]
    UnknownColumnType(String),

    /// Capacity calculation overflow
    #[error("Capacity overflow during {operation}")]
    CapacityOverflow { operation: &'static str },

    /// Memory limit exceeded for buffer growth
    #[error("Memory limit exceeded for table '{table}': requested {requested} bytes, limit {limit} bytes")]
    MemoryLimitExceeded {
        requested: usize,
        limit: usize,
        table: String,
    },

    /// Allocator refused the requested capacity
    #[error("Allocation of {requested} bytes failed for table '{table}'")]
    AllocationFailed { table: String, requested: usize },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl TableError {
    /// Attaches the table name to errors raised below the table layer.
    pub(crate) fn for_table(self, name: &str) -> Self {
        match self {
            TableError::InvalidRowSize { row_size, .. } => TableError::InvalidRowSize {
                table: name.to_string(),
                row_size,
            },
            TableError::RowSizeMismatch { expected, got, .. } => TableError::RowSizeMismatch {
                table: name.to_string(),
                expected,
                got,
            },
            TableError::MemoryLimitExceeded {
                requested, limit, ..
            } => TableError::MemoryLimitExceeded {
                requested,
                limit,
                table: name.to_string(),
            },
            TableError::AllocationFailed { requested, .. } => TableError::AllocationFailed {
                table: name.to_string(),
                requested,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::SerializationError(err.to_string())
    }
}
