//! Predicate scans over table rows.
//!
//! Every query is a linear pass over the valid rows in storage order.

use super::Table;
use crate::error::TableError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Table {
    /// Returns the indices of all rows matching `predicate`, in scan order.
    ///
    /// The result is a snapshot owned by the caller. Later structural changes
    /// to the table do not update it.
    pub fn select<P>(&self, mut predicate: P) -> Vec<usize>
    where
        P: FnMut(&[u8]) -> bool,
    {
        self.rows()
            .enumerate()
            .filter_map(|(index, row)| predicate(row).then_some(index))
            .collect()
    }

    /// Copies all rows matching `predicate` into a new table with the same
    /// name, row size and columns.
    ///
    /// # Returns
    /// `Result<Table, TableError>` containing the independent result table.
    pub fn select_all<P>(&self, predicate: P) -> Result<Table, TableError>
    where
        P: FnMut(&[u8]) -> bool,
    {
        let indices = self.select(predicate);

        let mut result = Table::with_config(
            &self.name,
            self.row_size(),
            indices.len(),
            self.config.clone(),
        )?;
        result.reserve_columns(self.columns.len())?;
        result.columns.extend(self.columns.iter().cloned());

        for index in indices {
            if let Some(row) = self.get_row(index) {
                result.insert(row)?;
            }
        }

        Ok(result)
    }

    /// Returns the first row matching `predicate`.
    pub fn find_first<P>(&self, mut predicate: P) -> Option<&[u8]>
    where
        P: FnMut(&[u8]) -> bool,
    {
        self.rows().find(|row| predicate(row))
    }

    /// Returns the index of the first row matching `predicate`.
    pub fn find_first_index<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&[u8]) -> bool,
    {
        self.rows().position(|row| predicate(row))
    }

    /// Counts rows matching `predicate` without collecting indices.
    pub fn count<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&[u8]) -> bool,
    {
        self.rows().filter(|row| predicate(row)).count()
    }

    /// Returns `true` if any row matches `predicate`. Stops at the first match.
    pub fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&[u8]) -> bool,
    {
        self.rows().any(|row| predicate(row))
    }

    /// Parallel variant of [`Table::select`]. Indices are still returned in
    /// scan order.
    ///
    /// # Notes
    /// - Requires the `parallel` feature to be enabled.
    /// - `predicate` runs concurrently on rayon worker threads.
    #[cfg(feature = "parallel")]
    pub fn par_select<P>(&self, predicate: P) -> Vec<usize>
    where
        P: Fn(&[u8]) -> bool + Send + Sync,
    {
        self.as_bytes()
            .par_chunks_exact(self.row_size())
            .enumerate()
            .filter_map(|(index, row)| predicate(row).then_some(index))
            .collect()
    }

    /// Parallel variant of [`Table::count`].
    #[cfg(feature = "parallel")]
    pub fn par_count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&[u8]) -> bool + Send + Sync,
    {
        self.as_bytes()
            .par_chunks_exact(self.row_size())
            .filter(|row| predicate(row))
            .count()
    }
}
