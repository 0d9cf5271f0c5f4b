//! RowBuffer - a Vec<u8> store of fixed-size rows with explicit row capacity.
//!
//! The buffer length is always `row_count * row_size`; bytes beyond it are
//! never exposed. Row capacity is tracked separately from the allocator's
//! capacity so growth happens in whole rows and follows the doubling policy.
//! Every growth path reserves fallibly before touching the data, so a failed
//! growth leaves the buffer exactly as it was.

use std::slice::{ChunksExact, ChunksExactMut};

use tracing::debug;

use crate::error::TableError;

/// Contiguous storage for `row_count` records of `row_size` bytes.
#[derive(Debug)]
pub struct RowBuffer {
    data: Vec<u8>,
    row_size: usize,
    row_capacity: usize,
    max_buffer_size: usize,
}

impl RowBuffer {
    /// Allocates a buffer able to hold `row_capacity` rows without growing.
    ///
    /// # Arguments
    /// * `row_size` - Size of each row in bytes (must be > 0)
    /// * `row_capacity` - Initial capacity in rows (at least one row is reserved)
    /// * `max_buffer_size` - Upper bound for the buffer in bytes
    ///
    /// # Returns
    /// `Result<RowBuffer, TableError>` containing the buffer or the growth error.
    pub fn try_new(
        row_size: usize,
        row_capacity: usize,
        max_buffer_size: usize,
    ) -> Result<Self, TableError> {
        if row_size == 0 {
            return Err(TableError::InvalidRowSize {
                table: String::new(),
                row_size,
            });
        }

        let mut buffer = Self {
            data: Vec::new(),
            row_size,
            row_capacity: 0,
            max_buffer_size,
        };
        buffer.reserve_rows(row_capacity.max(1))?;
        Ok(buffer)
    }

    /// Returns the size of each row in bytes.
    pub fn row_size(&self) -> usize {
        self.row_size
    }

    /// Returns the number of valid rows.
    pub fn row_count(&self) -> usize {
        self.data.len() / self.row_size
    }

    /// Returns the capacity in rows.
    pub fn row_capacity(&self) -> usize {
        self.row_capacity
    }

    /// Returns the valid rows as one contiguous byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Byte range of the row at `index`, if it is a valid row.
    fn row_range(&self, index: usize) -> Option<std::ops::Range<usize>> {
        if index >= self.row_count() {
            return None;
        }
        let start = index * self.row_size;
        Some(start..start + self.row_size)
    }

    /// Returns the row at `index`, or `None` past `row_count`.
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        self.row_range(index).map(|range| &self.data[range])
    }

    /// Returns the row at `index` mutably, or `None` past `row_count`.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        self.row_range(index).map(move |range| &mut self.data[range])
    }

    /// Iterates valid rows in storage order.
    pub fn rows(&self) -> ChunksExact<'_, u8> {
        self.data.chunks_exact(self.row_size)
    }

    /// Iterates valid rows mutably in storage order.
    pub fn rows_mut(&mut self) -> ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.row_size)
    }

    /// Grows the buffer to hold at least `capacity` rows.
    ///
    /// # Returns
    /// `Ok(true)` if growth occurred, `Ok(false)` if capacity was sufficient.
    /// On error nothing has changed.
    pub fn reserve_rows(&mut self, capacity: usize) -> Result<bool, TableError> {
        if capacity <= self.row_capacity {
            return Ok(false);
        }

        let bytes = capacity
            .checked_mul(self.row_size)
            .ok_or(TableError::CapacityOverflow {
                operation: "row buffer growth",
            })?;

        if bytes > self.max_buffer_size {
            return Err(TableError::MemoryLimitExceeded {
                requested: bytes,
                limit: self.max_buffer_size,
                table: String::new(),
            });
        }

        self.data
            .try_reserve_exact(bytes - self.data.len())
            .map_err(|_| TableError::AllocationFailed {
                table: String::new(),
                requested: bytes,
            })?;
        self.row_capacity = capacity;
        Ok(true)
    }

    /// Makes room for `additional` rows, doubling capacity when full.
    pub fn grow_for(&mut self, additional: usize) -> Result<bool, TableError> {
        let required = self
            .row_count()
            .checked_add(additional)
            .ok_or(TableError::CapacityOverflow {
                operation: "row count calculation",
            })?;

        if required <= self.row_capacity {
            return Ok(false);
        }

        // Double capacity strategy
        let doubled = self
            .row_capacity
            .max(1)
            .checked_mul(2)
            .ok_or(TableError::CapacityOverflow {
                operation: "row capacity doubling",
            })?;

        let target = doubled.max(required);
        self.reserve_rows(target)?;
        debug!(
            row_size = self.row_size,
            row_capacity = target,
            "row buffer grown"
        );
        Ok(true)
    }

    /// Appends one row, growing first if the buffer is full.
    ///
    /// # Returns
    /// Index of the appended row, or `RowSizeMismatch` if `row` is not
    /// exactly `row_size` bytes.
    pub fn push(&mut self, row: &[u8]) -> Result<usize, TableError> {
        if row.len() != self.row_size {
            return Err(TableError::RowSizeMismatch {
                table: String::new(),
                expected: self.row_size,
                got: row.len(),
            });
        }
        self.grow_for(1)?;
        let index = self.row_count();
        self.data.extend_from_slice(row);
        Ok(index)
    }

    /// Removes every row for which `remove` returns `true`, shifting the
    /// survivors left in their original order.
    ///
    /// # Returns
    /// Number of rows removed.
    pub fn compact<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&[u8]) -> bool,
    {
        let row_size = self.row_size;
        let row_count = self.row_count();
        let mut write = 0;

        for read in 0..row_count {
            let start = read * row_size;
            if remove(&self.data[start..start + row_size]) {
                continue;
            }
            if write != read {
                self.data
                    .copy_within(start..start + row_size, write * row_size);
            }
            write += 1;
        }

        self.data.truncate(write * row_size);
        row_count - write
    }

    /// Reorders rows according to `compare` (unstable).
    ///
    /// Only an index permutation is allocated; rows are moved in place by
    /// walking the permutation's cycles.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&[u8], &[u8]) -> std::cmp::Ordering,
    {
        let row_size = self.row_size;
        let data = &self.data;
        // order[dest] is the current index of the row that belongs at dest
        let mut order: Vec<usize> = (0..self.row_count()).collect();
        order.sort_unstable_by(|&a, &b| {
            compare(
                &data[a * row_size..(a + 1) * row_size],
                &data[b * row_size..(b + 1) * row_size],
            )
        });

        for start in 0..order.len() {
            let mut dest = start;
            // Position `dest` holds the cycle's first row until the cycle closes
            loop {
                let source = order[dest];
                order[dest] = dest;
                if source == start {
                    break;
                }
                self.swap_rows(dest, source);
                dest = source;
            }
        }
    }

    /// Swaps two distinct valid rows.
    fn swap_rows(&mut self, a: usize, b: usize) {
        let row_size = self.row_size;
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(high * row_size);
        head[low * row_size..(low + 1) * row_size].swap_with_slice(&mut tail[..row_size]);
    }

    /// Drops all rows. Capacity and underlying bytes are left alone.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Shrinks capacity to the current row count (minimum one row).
    pub fn shrink_to_fit(&mut self) {
        let target = self.row_count().max(1);
        self.data.shrink_to(target * self.row_size);
        self.row_capacity = target;
    }

    /// Deep-copies the buffer with the same row size and row capacity.
    pub fn try_clone(&self) -> Result<Self, TableError> {
        let mut clone = Self::try_new(self.row_size, self.row_capacity, self.max_buffer_size)?;
        clone.data.extend_from_slice(&self.data);
        Ok(clone)
    }
}
