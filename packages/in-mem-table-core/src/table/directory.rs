//! Column directory management.
//!
//! The directory is metadata only. Registering or removing a column never
//! touches row storage.

use tracing::{debug, trace};

use super::column::{ColumnDef, ColumnType};
use super::Table;
use crate::error::TableError;

impl Table {
    /// Appends a column descriptor, doubling directory capacity if full.
    ///
    /// Duplicate names and offsets outside the row are accepted; see
    /// [`Table::validate_columns`] for an explicit check.
    ///
    /// # Arguments
    /// * `name` - Column name (truncated to the bounded name length)
    /// * `column_type` - Informational type tag
    /// * `offset` - Byte offset of the field within a row
    ///
    /// # Returns
    /// `Result<usize, TableError>` containing the index of the new column.
    pub fn add_column(
        &mut self,
        name: &str,
        column_type: ColumnType,
        offset: usize,
    ) -> Result<usize, TableError> {
        if self.columns.len() >= self.column_capacity {
            let doubled = self
                .column_capacity
                .max(1)
                .checked_mul(2)
                .ok_or(TableError::CapacityOverflow {
                    operation: "column capacity doubling",
                })?;
            self.reserve_columns(doubled)?;
        }

        let column = ColumnDef::new(name, column_type, offset);
        trace!(table = %self.name, column = %column.name, %column_type, offset, "column added");
        self.columns.push(column);
        Ok(self.columns.len() - 1)
    }

    /// Removes the first column named `name`; later columns shift left.
    ///
    /// # Returns
    /// `Result<ColumnDef, TableError>` containing the removed descriptor, or
    /// `ColumnNotFound`.
    pub fn remove_column(&mut self, name: &str) -> Result<ColumnDef, TableError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| TableError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })?;

        trace!(table = %self.name, column = name, index, "column removed");
        Ok(self.columns.remove(index))
    }

    /// Returns the index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns the first column named `name`.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns all column descriptors in registration order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Returns the number of registered columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column directory capacity.
    pub fn column_capacity(&self) -> usize {
        self.column_capacity
    }

    /// Grows the column directory to at least `capacity` descriptors. Smaller
    /// requests are no-ops.
    ///
    /// # Returns
    /// `Ok(true)` if the directory grew. On error nothing has changed.
    pub fn reserve_columns(&mut self, capacity: usize) -> Result<bool, TableError> {
        if capacity <= self.column_capacity {
            return Ok(false);
        }

        self.columns
            .try_reserve_exact(capacity - self.columns.len())
            .map_err(|_| TableError::AllocationFailed {
                table: self.name.clone(),
                requested: capacity.saturating_mul(std::mem::size_of::<ColumnDef>()),
            })?;

        debug!(
            table = %self.name,
            from = self.column_capacity,
            to = capacity,
            "column capacity grown"
        );
        self.column_capacity = capacity;
        Ok(true)
    }
}
