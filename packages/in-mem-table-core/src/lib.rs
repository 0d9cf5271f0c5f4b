//! Embeddable in-memory row store.
//!
//! A [`Table`] keeps fixed-size binary rows in a growable buffer together with
//! a column directory that names fields and their byte offsets. All access goes
//! through linear scans driven by caller-supplied closures; the engine never
//! interprets row bytes.
//!
//! [`TypedTable`] layers a caller-defined [`Row`] type on top of the byte-level
//! engine.

mod buffer;
pub mod config;
pub mod error;
pub mod row;
pub mod table;
pub mod typed;

pub use config::TableConfig;
pub use error::TableError;
pub use row::Row;
pub use table::{ColumnDef, ColumnSchema, ColumnType, Table, TableSchema};
pub use typed::TypedTable;
