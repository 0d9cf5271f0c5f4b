//! Typed view over a [`Table`] whose rows are a host [`Row`] type.
//!
//! Closures receive decoded records instead of byte slices. Storage and scan
//! semantics are exactly those of the underlying table.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::config::TableConfig;
use crate::error::TableError;
use crate::row::Row;
use crate::table::Table;

/// Table of `R` records.
#[derive(Debug)]
pub struct TypedTable<R: Row> {
    table: Table,
    _row: PhantomData<fn() -> R>,
}

impl<R: Row> TypedTable<R> {
    /// Creates a table sized for `R` and registers `R::columns()`.
    pub fn create(name: &str, initial_capacity: usize) -> Result<Self, TableError> {
        Self::with_config(name, initial_capacity, TableConfig::default())
    }

    /// Like [`TypedTable::create`] with an explicit configuration.
    pub fn with_config(
        name: &str,
        initial_capacity: usize,
        config: TableConfig,
    ) -> Result<Self, TableError> {
        let mut table = Table::with_config(name, R::SIZE, initial_capacity, config)?;
        for column in R::columns() {
            table.add_column(&column.name, column.column_type, column.offset)?;
        }
        Ok(Self {
            table,
            _row: PhantomData,
        })
    }

    /// Wraps an existing table whose row size matches `R::SIZE`.
    pub fn from_table(table: Table) -> Result<Self, TableError> {
        if table.row_size() != R::SIZE {
            return Err(TableError::RowSizeMismatch {
                table: table.name().to_string(),
                expected: R::SIZE,
                got: table.row_size(),
            });
        }
        Ok(Self {
            table,
            _row: PhantomData,
        })
    }

    /// Returns the underlying byte-level table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Unwraps into the underlying byte-level table.
    pub fn into_inner(self) -> Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    fn encode(row: &R) -> Vec<u8> {
        let mut bytes = vec![0u8; R::SIZE];
        row.encode(&mut bytes);
        bytes
    }

    /// Inserts a record and returns its index.
    pub fn insert(&mut self, row: &R) -> Result<usize, TableError> {
        self.table.insert(&Self::encode(row))
    }

    /// Encodes `rows` back to back into one fallibly allocated batch.
    fn encode_batch(rows: &[R]) -> Result<Vec<u8>, TableError> {
        let len = rows
            .len()
            .checked_mul(R::SIZE)
            .ok_or(TableError::CapacityOverflow {
                operation: "typed batch encoding",
            })?;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| TableError::AllocationFailed {
                table: String::new(),
                requested: len,
            })?;
        bytes.resize(len, 0);
        for (row, out) in rows.iter().zip(bytes.chunks_exact_mut(R::SIZE)) {
            row.encode(out);
        }
        Ok(bytes)
    }

    /// Inserts records in order with a single up-front reservation.
    ///
    /// # Returns
    /// Number of records inserted (see [`Table::insert_many`]).
    pub fn insert_many(&mut self, rows: &[R]) -> Result<usize, TableError> {
        let bytes = Self::encode_batch(rows).map_err(|e| e.for_table(self.table.name()))?;
        self.table.insert_many(&bytes)
    }

    /// Decodes the record at `index`.
    pub fn get(&self, index: usize) -> Option<R> {
        self.table.get_row(index).map(R::decode)
    }

    /// Decodes every record in storage order.
    pub fn iter(&self) -> impl Iterator<Item = R> + '_ {
        self.table.rows().map(R::decode)
    }

    pub fn select<P>(&self, mut predicate: P) -> Vec<usize>
    where
        P: FnMut(&R) -> bool,
    {
        self.table.select(|bytes| predicate(&R::decode(bytes)))
    }

    pub fn select_all<P>(&self, mut predicate: P) -> Result<Self, TableError>
    where
        P: FnMut(&R) -> bool,
    {
        let table = self.table.select_all(|bytes| predicate(&R::decode(bytes)))?;
        Ok(Self {
            table,
            _row: PhantomData,
        })
    }

    /// Applies `mapper` to every matching record and writes it back in place.
    pub fn update<P, M>(&mut self, mut predicate: P, mut mapper: M) -> usize
    where
        P: FnMut(&R) -> bool,
        M: FnMut(&mut R),
    {
        self.table.update(
            |bytes| predicate(&R::decode(bytes)),
            |bytes| {
                let mut row = R::decode(bytes);
                mapper(&mut row);
                row.encode(bytes);
            },
        )
    }

    pub fn delete<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&R) -> bool,
    {
        self.table.delete(|bytes| predicate(&R::decode(bytes)))
    }

    pub fn find_first<P>(&self, mut predicate: P) -> Option<R>
    where
        P: FnMut(&R) -> bool,
    {
        self.table
            .rows()
            .map(R::decode)
            .find(|row| predicate(row))
    }

    pub fn count<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&R) -> bool,
    {
        self.table.count(|bytes| predicate(&R::decode(bytes)))
    }

    pub fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&R) -> bool,
    {
        self.table.exists(|bytes| predicate(&R::decode(bytes)))
    }

    /// Sorts records in place (unstable).
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&R, &R) -> Ordering,
    {
        self.table
            .sort(|a, b| compare(&R::decode(a), &R::decode(b)));
    }

    pub fn try_clone(&self) -> Result<Self, TableError> {
        Ok(Self {
            table: self.table.try_clone()?,
            _row: PhantomData,
        })
    }
}
