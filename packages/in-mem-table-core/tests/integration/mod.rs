//! Integration test suite.
//!
//! 1. Basic CRUD through the byte-level table
//! 2. Typed rows
//! 3. Randomised growth, delete and sort properties

pub mod basic_crud;
pub mod helpers;
pub mod randomized_tests;
