//! Row sorting.
//!
//! Array mode sorts by physically exchanging rows (cells and heights) with a
//! middle-pivot partition-exchange sort; ties are left where they fall, so it
//! is not stable. Virtual mode never moves data: it stably sorts the
//! row-order permutation instead.

use std::cmp::Ordering;

use crate::store::{CellStore, Permutation};
use crate::types::Cell;

/// Compares two cells from the sort column.
pub type CellComparator = dyn Fn(&Cell, &Cell) -> Ordering;

/// Lexicographic comparison of displayed text.
pub fn compare_text(a: &Cell, b: &Cell) -> Ordering {
    a.text.cmp(&b.text)
}

/// Numeric comparison of displayed text parsed as an integer.
///
/// Parsing takes the leading optionally-signed digits, so `"42 kg"` is 42 and
/// text without leading digits counts as 0.
pub fn compare_numeric(a: &Cell, b: &Cell) -> Ordering {
    parse_leading_int(&a.text).cmp(&parse_leading_int(&b.text))
}

pub(crate) fn parse_leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, text.get(1..).unwrap_or("")),
        Some(b'+') => (false, text.get(1..).unwrap_or("")),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative {
        -value
    } else {
        value
    }
}

/// Sort display rows `low..=high` of `store` on column `col` (array mode).
pub(crate) fn sort_rows(
    store: &mut CellStore,
    col: u32,
    low: u32,
    high: u32,
    ascending: bool,
    compare: &CellComparator,
) {
    if low >= high {
        return;
    }
    let empty = Cell::default();
    partition_exchange(
        store,
        col,
        i64::from(low),
        i64::from(high),
        ascending,
        compare,
        &empty,
    );
}

fn partition_exchange(
    store: &mut CellStore,
    col: u32,
    low: i64,
    high: i64,
    ascending: bool,
    compare: &CellComparator,
    empty: &Cell,
) {
    if low >= high {
        return;
    }
    let directed = |a: &Cell, b: &Cell| {
        if ascending {
            compare(a, b)
        } else {
            compare(b, a)
        }
    };
    let pivot = store
        .cell(row_index(low + (high - low) / 2), col)
        .unwrap_or(empty)
        .clone();

    let mut lo = low;
    let mut hi = high;
    while lo <= hi {
        while lo < high
            && directed(store.cell(row_index(lo), col).unwrap_or(empty), &pivot) == Ordering::Less
        {
            lo += 1;
        }
        while hi > low
            && directed(store.cell(row_index(hi), col).unwrap_or(empty), &pivot)
                == Ordering::Greater
        {
            hi -= 1;
        }
        if lo <= hi {
            let a = store.cell(row_index(lo), col).unwrap_or(empty);
            let b = store.cell(row_index(hi), col).unwrap_or(empty);
            if compare(a, b) != Ordering::Equal {
                store.swap_rows(row_index(lo), row_index(hi));
            }
            lo += 1;
            hi -= 1;
        }
    }

    if low < hi {
        partition_exchange(store, col, low, hi, ascending, compare, empty);
    }
    if lo < high {
        partition_exchange(store, col, lo, high, ascending, compare, empty);
    }
}

fn row_index(i: i64) -> u32 {
    u32::try_from(i).unwrap_or(0)
}

/// Stable sort of the permutation tail starting at display row `start`.
///
/// `compare` receives logical row ids. Descending order reverses the
/// comparison rather than the result, so equal keys keep their order.
pub(crate) fn sort_permutation<F>(order: &mut Permutation, start: u32, ascending: bool, mut compare: F)
where
    F: FnMut(u32, u32) -> Ordering,
{
    order.sort_tail_by(start, |a, b| {
        if ascending {
            compare(a, b)
        } else {
            compare(b, a)
        }
    });
}
