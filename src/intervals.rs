//! Integer key ranges for coverings.
//!
//! Stores keyed by [`QuadCellId::preorder_key`] can fetch everything indexed
//! under a cell, descendants included, with one range scan. This module turns
//! a covering into the minimal sorted list of such ranges.

use crate::cell_id::QuadCellId;
use serde::{Deserialize, Serialize};

/// Half-open range `start..end` of pre-order cell keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyInterval {
    pub start: i64,
    pub end: i64,
}

impl KeyInterval {
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn new(start: i64, end: i64) -> Self {
        assert!(start <= end, "Interval start {} is past end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, key: i64) -> bool {
        self.start <= key && key < self.end
    }
}

/// Keys of `id` and all of its descendants.
pub fn cell_interval(id: &QuadCellId) -> KeyInterval {
    let start = id.preorder_key();
    KeyInterval::new(start, start + id.subtree_size())
}

/// Sort intervals and merge the ones that overlap or touch.
///
/// # Examples
///
/// ```
/// use quadcell::intervals::{KeyInterval, sort_and_merge_intervals};
///
/// let merged = sort_and_merge_intervals(vec![
///     KeyInterval::new(10, 20),
///     KeyInterval::new(1, 5),
///     KeyInterval::new(5, 8),
///     KeyInterval::new(15, 30),
/// ]);
/// assert_eq!(merged, vec![KeyInterval::new(1, 8), KeyInterval::new(10, 30)]);
/// ```
pub fn sort_and_merge_intervals(mut intervals: Vec<KeyInterval>) -> Vec<KeyInterval> {
    intervals.sort_unstable();

    let mut merged: Vec<KeyInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Sorted, merged key ranges spanning every cell of a covering.
pub fn covering_intervals(cells: &[QuadCellId]) -> Vec<KeyInterval> {
    sort_and_merge_intervals(cells.iter().map(cell_interval).collect())
}
