//! Full CRUD lifecycle through the byte-level table.

use ntest::timeout;

use in_mem_table_core::row::write_i32;
use in_mem_table_core::{ColumnType, Table, TableConfig, TableError};

use crate::helpers::{first, pair, second};

/// Create table -> register columns -> insert -> query -> update -> delete
#[test]
fn test_full_crud_lifecycle() -> anyhow::Result<()> {
    let mut table = Table::create("products", 8, 0)?;
    table.add_column("id", ColumnType::Int, 0)?;
    table.add_column("stock", ColumnType::Int, 4)?;
    table.validate_columns()?;

    for id in 1..=100 {
        table.insert(&pair(id, id % 10))?;
    }
    assert_eq!(table.len(), 100);

    // Read back every row
    for (index, row) in table.rows().enumerate() {
        assert_eq!(first(row), index as i32 + 1);
    }

    // Out of stock items
    let empty = table.select(|row| second(row) == 0);
    assert_eq!(empty.len(), 10);
    assert!(empty.iter().all(|&i| first(table.get_row(i).unwrap()) % 10 == 0));

    // Restock them
    let restocked = table.update(|row| second(row) == 0, |row| write_i32(row, 4, 50));
    assert_eq!(restocked, 10);
    assert!(!table.exists(|row| second(row) == 0));
    assert_eq!(table.count(|row| second(row) == 50), 10);

    // Drop odd ids
    let removed = table.delete(|row| first(row) % 2 == 1);
    assert_eq!(removed, 50);
    assert_eq!(table.len(), 50);
    assert_eq!(first(table.get_row(0).unwrap()), 2);
    assert_eq!(first(table.get_row(49).unwrap()), 100);

    Ok(())
}

#[test]
fn test_stale_indices_after_delete() -> anyhow::Result<()> {
    let mut table = Table::create("snapshots", 8, 4)?;
    for i in 0..4 {
        table.insert(&pair(i, 0))?;
    }

    let snapshot = table.select(|row| first(row) >= 2);
    assert_eq!(snapshot, vec![2, 3]);

    table.delete(|row| first(row) == 0);

    // The snapshot is untouched; index 3 is now past the end
    assert_eq!(snapshot, vec![2, 3]);
    assert_eq!(first(table.get_row(2).unwrap()), 3);
    assert!(table.get_row(3).is_none());
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_memory_limit_with_batches() {
    let config = TableConfig {
        max_buffer_size: 8 * 8,
        ..Default::default()
    };
    let mut table = Table::with_config("bounded", 8, 4, config).unwrap();

    let batch: Vec<u8> = (0..6).flat_map(|i| pair(i, i)).collect();
    assert_eq!(table.insert_many(&batch).unwrap(), 6);
    assert_eq!(table.row_capacity(), 6);

    // 6 rows, doubling to 12 would need 96 bytes
    let err = table.insert(&pair(6, 6)).unwrap_err();
    assert!(matches!(err, TableError::MemoryLimitExceeded { requested: 96, .. }));
    assert_eq!(table.len(), 6);

    // An explicit reservation within the limit still works
    assert!(table.reserve_rows(8).unwrap());
    table.insert(&pair(6, 6)).unwrap();
    table.insert(&pair(7, 7)).unwrap();
    assert_eq!(table.len(), 8);
}

#[test]
fn test_clone_then_diverge() -> anyhow::Result<()> {
    let mut source = Table::create("source", 8, 2)?;
    source.add_column("a", ColumnType::Int, 0)?;
    source.insert_many(&[pair(1, 1), pair(2, 2)].concat())?;

    let mut copy = source.try_clone()?;
    copy.remove_column("a")?;
    copy.sort(|a, b| first(b).cmp(&first(a)));

    assert_eq!(source.column_count(), 1);
    assert_eq!(first(source.get_row(0).unwrap()), 1);
    assert_eq!(copy.column_count(), 0);
    assert_eq!(first(copy.get_row(0).unwrap()), 2);
    Ok(())
}
