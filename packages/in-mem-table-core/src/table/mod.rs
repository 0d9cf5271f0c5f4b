//! Table storage, column directory, queries and schema export.

mod column;
mod directory;
mod query;
mod schema;
#[allow(clippy::module_inception)]
mod table;
pub(crate) mod validation;

pub use column::{ColumnDef, ColumnType};
pub use schema::{ColumnSchema, TableSchema};
pub use table::Table;
