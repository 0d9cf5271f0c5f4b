//! Validation of the column directory against the row layout.

use std::collections::HashSet;

use super::column::ColumnDef;
use super::Table;
use crate::error::TableError;

/// Rejects the first column whose name was already used by an earlier column.
pub(crate) fn validate_unique_names(table: &str, columns: &[ColumnDef]) -> Result<(), TableError> {
    let mut seen_names = HashSet::new();
    for column in columns {
        if !seen_names.insert(column.name.as_str()) {
            return Err(TableError::InvalidColumn {
                table: table.to_string(),
                column: column.name.clone(),
                reason: "duplicate column name".to_string(),
            });
        }
    }
    Ok(())
}

/// Rejects the first column whose offset does not fall inside a row.
pub(crate) fn validate_offsets(
    table: &str,
    columns: &[ColumnDef],
    row_size: usize,
) -> Result<(), TableError> {
    for column in columns {
        if column.offset >= row_size {
            return Err(TableError::InvalidColumn {
                table: table.to_string(),
                column: column.name.clone(),
                reason: format!("offset {} outside row of {} bytes", column.offset, row_size),
            });
        }
    }
    Ok(())
}

impl Table {
    /// Checks the column directory for duplicate names and offsets outside
    /// `[0, row_size)`.
    ///
    /// `add_column` performs neither check; hosts that want them call this
    /// after registering their columns.
    pub fn validate_columns(&self) -> Result<(), TableError> {
        validate_unique_names(&self.name, &self.columns)?;
        validate_offsets(&self.name, &self.columns, self.row_size())
    }
}
