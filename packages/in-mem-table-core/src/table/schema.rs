//! Schema export for host introspection.

use serde::{Deserialize, Serialize};

use super::column::{ColumnDef, ColumnType};
use super::Table;
use crate::config::TableConfig;
use crate::error::TableError;

/// Serializable description of a table's layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Row size in bytes
    pub row_size: usize,
    /// Number of rows at export time
    pub row_count: usize,
    /// Row capacity at export time
    pub row_capacity: usize,
    /// Column definitions in registration order
    pub columns: Vec<ColumnSchema>,
}

/// Column schema for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,
    /// Type tag
    pub r#type: ColumnType,
    /// Byte offset within row
    pub offset: usize,
}

impl From<&ColumnDef> for ColumnSchema {
    fn from(column: &ColumnDef) -> Self {
        Self {
            name: column.name.clone(),
            r#type: column.column_type,
            offset: column.offset,
        }
    }
}

impl TableSchema {
    /// Renders the schema as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a schema previously produced by [`TableSchema::to_json`].
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Table {
    /// Describes the table's name, layout and columns.
    pub fn schema(&self) -> TableSchema {
        TableSchema {
            name: self.name.clone(),
            row_size: self.row_size(),
            row_count: self.len(),
            row_capacity: self.row_capacity(),
            columns: self.columns.iter().map(ColumnSchema::from).collect(),
        }
    }

    /// Creates an empty table with the layout described by `schema`.
    ///
    /// Rows are not part of a schema; the new table starts empty with the
    /// exported row capacity.
    pub fn from_schema(schema: &TableSchema, config: TableConfig) -> Result<Self, TableError> {
        let mut table = Table::with_config(&schema.name, schema.row_size, schema.row_capacity, config)?;
        table.reserve_columns(schema.columns.len())?;
        for column in &schema.columns {
            table.add_column(&column.name, column.r#type, column.offset)?;
        }
        Ok(table)
    }
}
