//! Randomised checks of growth, compaction and sorting.

use ntest::timeout;
use rand::Rng;

use in_mem_table_core::Table;

use crate::helpers::{first, pair, second};

#[timeout(5000)]
#[test]
fn test_growth_preserves_rows() {
    let mut rng = rand::thread_rng();

    for initial_capacity in [1, 3, 100] {
        let mut table = Table::create("growth", 8, initial_capacity).unwrap();
        let expected: Vec<(i32, i32)> = (0..1000).map(|_| (rng.gen(), rng.gen())).collect();

        for &(a, b) in &expected {
            table.insert(&pair(a, b)).unwrap();
        }

        assert_eq!(table.len(), expected.len());
        assert!(table.row_capacity() >= table.len());
        let stored: Vec<(i32, i32)> = table.rows().map(|row| (first(row), second(row))).collect();
        assert_eq!(stored, expected);
    }
}

#[timeout(5000)]
#[test]
fn test_delete_preserves_relative_order() {
    let mut rng = rand::thread_rng();
    let mut table = Table::create("compact", 8, 16).unwrap();

    let values: Vec<i32> = (0..500).map(|_| rng.gen_range(0..10)).collect();
    for (i, &v) in values.iter().enumerate() {
        table.insert(&pair(i as i32, v)).unwrap();
    }

    let doomed = rng.gen_range(0..10);
    let matches = table.count(|row| second(row) == doomed);
    let removed = table.delete(|row| second(row) == doomed);

    assert_eq!(removed, matches);
    assert_eq!(table.len(), values.len() - removed);

    let survivors: Vec<i32> = table.rows().map(first).collect();
    let expected: Vec<i32> = values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v != doomed)
        .map(|(i, _)| i as i32)
        .collect();
    assert_eq!(survivors, expected);
}

#[timeout(5000)]
#[test]
fn test_sort_orders_all_rows() {
    let mut rng = rand::thread_rng();
    let mut table = Table::create("sort", 8, 0).unwrap();

    let mut values: Vec<i32> = (0..300).map(|_| rng.gen_range(-1000..1000)).collect();
    for &v in &values {
        table.insert(&pair(v, v.wrapping_mul(7))).unwrap();
    }

    table.sort(|a, b| first(a).cmp(&first(b)));
    values.sort_unstable();

    let sorted: Vec<i32> = table.rows().map(first).collect();
    assert_eq!(sorted, values);
    assert!(table.rows().all(|row| second(row) == first(row).wrapping_mul(7)));
}

#[timeout(5000)]
#[test]
fn test_select_count_exists_agree() {
    let mut rng = rand::thread_rng();
    let mut table = Table::create("agree", 8, 0).unwrap();
    for i in 0..200 {
        table.insert(&pair(i, rng.gen_range(0..50))).unwrap();
    }

    for threshold in 0..55 {
        let selected = table.select(|row| second(row) >= threshold);
        let count = table.count(|row| second(row) >= threshold);
        assert_eq!(selected.len(), count);
        assert_eq!(table.exists(|row| second(row) >= threshold), count > 0);
        assert!(selected.windows(2).all(|w| w[0] < w[1]));
    }
}
