//! Shared fixtures for integration tests.

use in_mem_table_core::row::{read_f64, read_i32, read_str, write_f64, write_i32, write_str};
use in_mem_table_core::{ColumnDef, ColumnType, Row};

/// Employee record used across the integration tests.
///
/// Layout: id (i32, 0..4), salary (f64, 8..16), name (16 bytes, 16..32).
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub salary: f64,
    pub name: String,
}

pub const ID_OFFSET: usize = 0;
pub const SALARY_OFFSET: usize = 8;
pub const NAME_OFFSET: usize = 16;
pub const NAME_LEN: usize = 16;

impl Employee {
    pub fn new(id: i32, salary: f64, name: &str) -> Self {
        Self {
            id,
            salary,
            name: name.to_string(),
        }
    }
}

impl Row for Employee {
    const SIZE: usize = 32;

    fn encode(&self, out: &mut [u8]) {
        write_i32(out, ID_OFFSET, self.id);
        write_f64(out, SALARY_OFFSET, self.salary);
        write_str(out, NAME_OFFSET, NAME_LEN, &self.name);
    }

    fn decode(bytes: &[u8]) -> Self {
        Self {
            id: read_i32(bytes, ID_OFFSET),
            salary: read_f64(bytes, SALARY_OFFSET),
            name: read_str(bytes, NAME_OFFSET, NAME_LEN),
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("id", ColumnType::Int, ID_OFFSET),
            ColumnDef::new("salary", ColumnType::Float, SALARY_OFFSET),
            ColumnDef::new("name", ColumnType::String, NAME_OFFSET),
        ]
    }
}

/// Encodes a row of two 4-byte ints.
pub fn pair(a: i32, b: i32) -> [u8; 8] {
    let mut row = [0u8; 8];
    write_i32(&mut row, 0, a);
    write_i32(&mut row, 4, b);
    row
}

pub fn first(row: &[u8]) -> i32 {
    read_i32(row, 0)
}

pub fn second(row: &[u8]) -> i32 {
    read_i32(row, 4)
}
