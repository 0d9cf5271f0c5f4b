//! Table storage and row management.
//!
//! Each table has:
//! - A fixed row size chosen at creation
//! - A row buffer holding `len()` rows of that size
//! - A column directory describing named fields for introspection
//!
//! Row indices are snapshots. `delete`, `clear` and `sort` move rows, so an
//! index obtained earlier may afterwards name a different row or none at all.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::buffer::RowBuffer;
use crate::config::{bounded_name, TableConfig};
use crate::error::TableError;

use super::column::ColumnDef;

/// In-memory table of fixed-size rows.
#[derive(Debug)]
pub struct Table {
    /// Table name (bounded length)
    pub(super) name: String,
    /// Row storage
    pub(super) rows: RowBuffer,
    /// Column directory in registration order
    pub(super) columns: Vec<ColumnDef>,
    /// Column directory capacity in descriptors
    pub(super) column_capacity: usize,
    /// Configuration the table was created with
    pub(super) config: TableConfig,
}

impl Table {
    /// Creates a new table with the default configuration.
    ///
    /// # Arguments
    /// * `name` - Table name (truncated to the bounded name length)
    /// * `row_size` - Size of each row in bytes (must be > 0)
    /// * `initial_capacity` - Initial capacity in rows (0 selects the default of 100)
    ///
    /// # Returns
    /// `Result<Table, TableError>` containing the created table or an error.
    pub fn create(name: &str, row_size: usize, initial_capacity: usize) -> Result<Self, TableError> {
        Self::with_config(name, row_size, initial_capacity, TableConfig::default())
    }

    /// Creates a new table with an explicit configuration.
    ///
    /// Nothing is left allocated when this fails.
    pub fn with_config(
        name: &str,
        row_size: usize,
        initial_capacity: usize,
        config: TableConfig,
    ) -> Result<Self, TableError> {
        let name = bounded_name(name);

        if row_size == 0 {
            return Err(TableError::InvalidRowSize {
                table: name,
                row_size,
            });
        }

        let capacity_rows = if initial_capacity > 0 {
            initial_capacity
        } else {
            config.initial_row_capacity
        };

        let rows = RowBuffer::try_new(row_size, capacity_rows, config.max_buffer_size)
            .map_err(|e| e.for_table(&name))?;
        let column_capacity = config.initial_column_capacity.max(1);
        let columns = Self::alloc_columns(&name, column_capacity)?;

        debug!(
            table = %name,
            row_size,
            row_capacity = rows.row_capacity(),
            "table created"
        );

        Ok(Self {
            name,
            rows,
            columns,
            column_capacity,
            config,
        })
    }

    /// Allocates an empty column directory able to hold `capacity` descriptors.
    pub(super) fn alloc_columns(name: &str, capacity: usize) -> Result<Vec<ColumnDef>, TableError> {
        let mut columns = Vec::new();
        columns
            .try_reserve_exact(capacity)
            .map_err(|_| TableError::AllocationFailed {
                table: name.to_string(),
                requested: capacity.saturating_mul(std::mem::size_of::<ColumnDef>()),
            })?;
        Ok(columns)
    }

    /// Returns the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the size of each row in bytes.
    pub fn row_size(&self) -> usize {
        self.rows.row_size()
    }

    /// Returns the number of rows currently stored.
    pub fn len(&self) -> usize {
        self.rows.row_count()
    }

    /// Returns `true` if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the row capacity.
    pub fn row_capacity(&self) -> usize {
        self.rows.row_capacity()
    }

    /// Returns the configuration the table was created with.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Removes all rows. Capacity is kept and the old bytes are not zeroed.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Deep-copies the table: same name, row size, row capacity, columns and
    /// rows. The copy shares nothing with the source.
    pub fn try_clone(&self) -> Result<Table, TableError> {
        let rows = self.rows.try_clone().map_err(|e| e.for_table(&self.name))?;

        let column_capacity = self
            .config
            .initial_column_capacity
            .max(1)
            .max(self.columns.len());
        let mut columns = Self::alloc_columns(&self.name, column_capacity)?;
        columns.extend(self.columns.iter().cloned());

        debug!(
            table = %self.name,
            rows = rows.row_count(),
            columns = columns.len(),
            "table cloned"
        );

        Ok(Table {
            name: self.name.clone(),
            rows,
            columns,
            column_capacity,
            config: self.config.clone(),
        })
    }

    /// Grows row capacity to at least `capacity` rows. Smaller requests are
    /// no-ops.
    ///
    /// # Returns
    /// `Ok(true)` if the buffer grew.
    pub fn reserve_rows(&mut self, capacity: usize) -> Result<bool, TableError> {
        let from = self.rows.row_capacity();
        let grown = self
            .rows
            .reserve_rows(capacity)
            .map_err(|e| e.for_table(&self.name))?;
        if grown {
            debug!(table = %self.name, from, to = capacity, "row capacity reserved");
        }
        Ok(grown)
    }

    /// Shrinks both buffers to their current counts (minimum one slot each).
    pub fn shrink_to_fit(&mut self) {
        self.rows.shrink_to_fit();
        let column_target = self.columns.len().max(1);
        self.columns.shrink_to(column_target);
        self.column_capacity = column_target;

        debug!(
            table = %self.name,
            row_capacity = self.rows.row_capacity(),
            column_capacity = self.column_capacity,
            "table shrunk"
        );
    }

    /// Returns the row at `index`, or `None` if `index >= len()`.
    pub fn get_row(&self, index: usize) -> Option<&[u8]> {
        self.rows.row(index)
    }

    /// Returns the row at `index` mutably, or `None` if `index >= len()`.
    ///
    /// The slice is exactly `row_size` bytes, so the row cannot be resized.
    pub fn get_row_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        self.rows.row_mut(index)
    }

    /// Iterates rows in storage order.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.rows.rows()
    }

    /// Returns all valid rows as one contiguous byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        self.rows.as_slice()
    }

    /// Appends a row, doubling capacity first if the table is full.
    ///
    /// # Arguments
    /// * `row` - Row bytes (must be exactly `row_size` bytes)
    ///
    /// # Returns
    /// `Result<usize, TableError>` containing the index of the inserted row.
    /// A failed growth leaves the table unchanged.
    pub fn insert(&mut self, row: &[u8]) -> Result<usize, TableError> {
        self.rows.push(row).map_err(|e| e.for_table(&self.name))
    }

    /// Appends `rows.len() / row_size` contiguous rows in order.
    ///
    /// Capacity for the whole batch is reserved in one step. If that
    /// reservation fails the batch is inserted row by row with doubling
    /// growth and stops at the first failure; rows already inserted stay.
    ///
    /// # Returns
    /// `Result<usize, TableError>` containing the number of rows inserted.
    /// Fewer than the batch size means the batch was cut short.
    pub fn insert_many(&mut self, rows: &[u8]) -> Result<usize, TableError> {
        let row_size = self.row_size();
        if rows.len() % row_size != 0 {
            return Err(TableError::BatchSizeMismatch {
                table: self.name.clone(),
                len: rows.len(),
                row_size,
            });
        }

        let count = rows.len() / row_size;
        if count == 0 {
            return Ok(0);
        }

        let required = self
            .len()
            .checked_add(count)
            .ok_or(TableError::CapacityOverflow {
                operation: "batch insert",
            })?;

        match self.reserve_rows(required) {
            Ok(_) => {
                for row in rows.chunks_exact(row_size) {
                    self.rows.push(row).map_err(|e| e.for_table(&self.name))?;
                }
                Ok(count)
            }
            Err(err) => {
                warn!(
                    table = %self.name,
                    count,
                    error = %err,
                    "batch reservation failed, inserting row by row"
                );

                let mut inserted = 0;
                for row in rows.chunks_exact(row_size) {
                    if let Err(err) = self.rows.push(row) {
                        warn!(
                            table = %self.name,
                            inserted,
                            count,
                            error = %err,
                            "batch insert stopped early"
                        );
                        break;
                    }
                    inserted += 1;
                }
                Ok(inserted)
            }
        }
    }

    /// Applies `mapper` in place to every row matching `predicate`.
    ///
    /// # Returns
    /// Number of rows passed to `mapper`.
    pub fn update<P, M>(&mut self, mut predicate: P, mut mapper: M) -> usize
    where
        P: FnMut(&[u8]) -> bool,
        M: FnMut(&mut [u8]),
    {
        let mut updated = 0;
        for row in self.rows.rows_mut() {
            if predicate(&*row) {
                mapper(row);
                updated += 1;
            }
        }
        updated
    }

    /// Removes every row matching `predicate`, keeping the remaining rows in
    /// their original relative order.
    ///
    /// # Returns
    /// Number of rows removed.
    pub fn delete<P>(&mut self, predicate: P) -> usize
    where
        P: FnMut(&[u8]) -> bool,
    {
        let removed = self.rows.compact(predicate);
        if removed > 0 {
            debug!(table = %self.name, removed, remaining = self.len(), "rows deleted");
        }
        removed
    }

    /// Sorts rows in place with `compare`. The sort is not stable.
    ///
    /// `compare` must be a total order; otherwise the resulting order is
    /// unspecified (but every row is kept).
    pub fn sort<F>(&mut self, compare: F)
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        if self.len() < 2 {
            return;
        }
        self.rows.sort_by(compare);
        debug!(table = %self.name, rows = self.len(), "table sorted");
    }
}
