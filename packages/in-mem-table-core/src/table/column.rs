//! Column descriptors within a table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::bounded_name;
use crate::error::TableError;

/// Logical type tag of a column.
///
/// Informational only: scans never look at it, callers' closures interpret
/// the row bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
    String,
    Bool,
    Date,
    Time,
    DateTime,
}

impl ColumnType {
    /// Returns the lower-case tag used in schema exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::String => "string",
            ColumnType::Bool => "bool",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int" => Ok(ColumnType::Int),
            "float" => Ok(ColumnType::Float),
            "string" => Ok(ColumnType::String),
            "bool" => Ok(ColumnType::Bool),
            "date" => Ok(ColumnType::Date),
            "time" => Ok(ColumnType::Time),
            "datetime" => Ok(ColumnType::DateTime),
            _ => Err(TableError::UnknownColumnType(s.to_string())),
        }
    }
}

/// Column definition within a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name (bounded length)
    pub name: String,
    /// Logical type tag
    pub column_type: ColumnType,
    /// Byte offset within a row, as declared by the caller
    pub offset: usize,
}

impl ColumnDef {
    /// Creates a new column definition. Over-long names are truncated.
    pub fn new(name: &str, column_type: ColumnType, offset: usize) -> Self {
        Self {
            name: bounded_name(name),
            column_type,
            offset,
        }
    }
}
