//! Per-axis geometry: row heights or column widths with cumulative positions.
//!
//! Positions are pre-computed so that hit testing is an O(log n) binary
//! search and every "sum of sizes between a and b" is O(1).

use crate::error::{GridError, Result};

/// Sizes along one axis plus their prefix sums.
///
/// `positions[i]` is the leading edge of entry `i`; `positions[len]` is the
/// total extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extents {
    sizes: Vec<u32>,
    positions: Vec<u32>,
}

impl Default for Extents {
    fn default() -> Self {
        Self {
            sizes: Vec::new(),
            positions: vec![0],
        }
    }
}

impl Extents {
    /// `count` entries of `size` pixels each.
    pub fn uniform(count: u32, size: u32) -> Self {
        let mut extents = Self::default();
        // Fresh vectors: failure here means the process is out of memory anyway.
        let _ = extents.resize(count, size);
        extents
    }

    pub fn len(&self) -> u32 {
        u32::try_from(self.sizes.len()).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Grow with `default` sized entries or truncate. Leaves `self` unchanged on
    /// allocation failure.
    pub fn resize(&mut self, count: u32, default: u32) -> Result<()> {
        let count = count as usize;
        if count > self.sizes.len() {
            let additional = count - self.sizes.len();
            self.sizes
                .try_reserve(additional)
                .map_err(|_| GridError::AllocationFailure { requested: count })?;
            self.positions
                .try_reserve(additional)
                .map_err(|_| GridError::AllocationFailure { requested: count })?;
            let start = self.sizes.len();
            self.sizes.resize(count, default);
            self.rebuild_from(start);
        } else {
            self.sizes.truncate(count);
            self.positions.truncate(count + 1);
        }
        Ok(())
    }

    /// Size of entry `index` (0 when out of range).
    pub fn size(&self, index: u32) -> u32 {
        self.sizes.get(index as usize).copied().unwrap_or(0)
    }

    /// Set the size of one entry and update the positions after it.
    pub fn set_size(&mut self, index: u32, size: u32) -> bool {
        let Some(slot) = self.sizes.get_mut(index as usize) else {
            return false;
        };
        if *slot != size {
            *slot = size;
            self.rebuild_from(index as usize);
        }
        true
    }

    /// Insert an entry before `index` (or append when `index == len`).
    pub fn insert(&mut self, index: u32, size: u32) -> Result<()> {
        let index = (index as usize).min(self.sizes.len());
        self.sizes
            .try_reserve(1)
            .map_err(|_| GridError::AllocationFailure {
                requested: self.sizes.len() + 1,
            })?;
        self.sizes.insert(index, size);
        self.positions.push(0);
        self.rebuild_from(index);
        Ok(())
    }

    pub fn remove(&mut self, index: u32) -> Option<u32> {
        let index = index as usize;
        if index >= self.sizes.len() {
            return None;
        }
        let size = self.sizes.remove(index);
        self.positions.pop();
        self.rebuild_from(index);
        Some(size)
    }

    pub fn swap(&mut self, a: u32, b: u32) {
        let (a, b) = (a as usize, b as usize);
        if a == b || a >= self.sizes.len() || b >= self.sizes.len() {
            return;
        }
        self.sizes.swap(a, b);
        self.rebuild_from(a.min(b));
    }

    /// Move entry `from` so that it ends up at `to`.
    pub fn move_entry(&mut self, from: u32, to: u32) {
        let (from, to) = (from as usize, to as usize);
        if from == to || from >= self.sizes.len() || to >= self.sizes.len() {
            return;
        }
        let size = self.sizes.remove(from);
        self.sizes.insert(to, size);
        self.rebuild_from(from.min(to));
    }

    /// Leading edge of entry `index`; `index == len` gives the total extent.
    pub fn start(&self, index: u32) -> u32 {
        self.positions
            .get(index as usize)
            .copied()
            .unwrap_or_else(|| self.total())
    }

    /// Trailing edge of entry `index`.
    pub fn end(&self, index: u32) -> u32 {
        self.start(index.saturating_add(1))
    }

    /// Sum of sizes in `[from, to)`.
    pub fn span(&self, from: u32, to: u32) -> u32 {
        self.start(to).saturating_sub(self.start(from))
    }

    pub fn total(&self) -> u32 {
        self.positions.last().copied().unwrap_or(0)
    }

    /// Entry containing absolute position `pos` (binary search).
    pub fn index_at(&self, pos: u32) -> Option<u32> {
        if pos >= self.total() {
            return None;
        }
        let i = match self.positions.binary_search(&pos) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        // Zero-sized entries share a position; step past them to the one that owns `pos`.
        let mut i = i;
        while self.sizes.get(i).is_some_and(|&s| s == 0) {
            i += 1;
        }
        u32::try_from(i).ok().filter(|&i| i < self.len())
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    /// Replace all sizes at once (used when restoring a saved layer).
    pub fn set_sizes(&mut self, sizes: Vec<u32>) {
        self.sizes = sizes;
        self.positions.clear();
        self.positions.push(0);
        self.rebuild_from(0);
    }

    fn rebuild_from(&mut self, start: usize) {
        let start = start.min(self.sizes.len());
        self.positions.truncate(start + 1);
        if self.positions.is_empty() {
            self.positions.push(0);
        }
        let mut pos = self.positions.last().copied().unwrap_or(0);
        for &size in self.sizes.iter().skip(start) {
            pos = pos.saturating_add(size);
            self.positions.push(pos);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_positions() {
        let e = Extents::uniform(10, 20);
        assert_eq!(e.len(), 10);
        assert_eq!(e.total(), 200);
        assert_eq!(e.start(3), 60);
        assert_eq!(e.end(3), 80);
        assert_eq!(e.span(2, 5), 60);
    }

    #[test]
    fn test_index_at() {
        let e = Extents::uniform(5, 64);
        assert_eq!(e.index_at(0), Some(0));
        assert_eq!(e.index_at(32), Some(0));
        assert_eq!(e.index_at(64), Some(1));
        assert_eq!(e.index_at(160), Some(2));
        assert_eq!(e.index_at(320), None);
    }

    #[test]
    fn test_index_at_skips_hidden() {
        let mut e = Extents::uniform(4, 10);
        e.set_size(1, 0);
        assert_eq!(e.index_at(10), Some(2));
    }

    #[test]
    fn test_set_size_updates_tail() {
        let mut e = Extents::uniform(4, 10);
        e.set_size(1, 30);
        assert_eq!(e.start(2), 40);
        assert_eq!(e.total(), 60);
        assert!(!e.set_size(9, 5));
    }

    #[test]
    fn test_resize_shrink_grow() {
        let mut e = Extents::uniform(4, 10);
        e.set_size(3, 50);
        e.resize(2, 10).unwrap();
        assert_eq!(e.total(), 20);
        e.resize(4, 15).unwrap();
        assert_eq!(e.sizes(), &[10, 10, 15, 15]);
        assert_eq!(e.total(), 50);
    }

    #[test]
    fn test_insert_remove_move() {
        let mut e = Extents::uniform(3, 10);
        e.insert(1, 40).unwrap();
        assert_eq!(e.sizes(), &[10, 40, 10, 10]);
        assert_eq!(e.remove(0), Some(10));
        assert_eq!(e.total(), 60);
        e.move_entry(0, 2);
        assert_eq!(e.sizes(), &[10, 10, 40]);
        assert_eq!(e.start(2), 20);
    }
}
