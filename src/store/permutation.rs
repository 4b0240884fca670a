//! Display-order indirection layer.
//!
//! Maps display positions to stable logical ids. Identity by default
//! (`[0, 1, .., n-1]`); column drag-reordering and virtual-mode sorting
//! permute it without moving the underlying data.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{GridError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permutation {
    order: Vec<u32>,
}

impl Permutation {
    pub fn identity(len: u32) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    pub fn len(&self) -> u32 {
        u32::try_from(self.order.len()).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Logical id shown at display position `display`.
    pub fn logical(&self, display: u32) -> Option<u32> {
        self.order.get(display as usize).copied()
    }

    /// Display position of logical id `logical` (linear scan).
    pub fn display_of(&self, logical: u32) -> Option<u32> {
        self.order
            .iter()
            .position(|&id| id == logical)
            .and_then(|i| u32::try_from(i).ok())
    }

    pub fn is_identity(&self) -> bool {
        self.order
            .iter()
            .enumerate()
            .all(|(i, &id)| id as usize == i)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.order
    }

    pub fn reset(&mut self) {
        let len = self.len();
        *self = Self::identity(len);
    }

    /// Grow by appending the new logical ids in order, or shrink by dropping
    /// every id `>= len` wherever it sits.
    pub fn resize(&mut self, len: u32) -> Result<()> {
        let current = self.len();
        if len > current {
            self.order
                .try_reserve((len - current) as usize)
                .map_err(|_| GridError::AllocationFailure {
                    requested: len as usize,
                })?;
            self.order.extend(current..len);
        } else if len < current {
            self.order.retain(|&id| id < len);
        }
        Ok(())
    }

    pub fn swap(&mut self, a: u32, b: u32) {
        let (a, b) = (a as usize, b as usize);
        if a < self.order.len() && b < self.order.len() {
            self.order.swap(a, b);
        }
    }

    /// Move the entry at display position `from` to `to`.
    pub fn move_entry(&mut self, from: u32, to: u32) -> bool {
        let (from, to) = (from as usize, to as usize);
        if from >= self.order.len() || to >= self.order.len() {
            return false;
        }
        if from != to {
            let id = self.order.remove(from);
            self.order.insert(to, id);
        }
        true
    }

    /// Insert a new logical id at display position `display`.
    ///
    /// Existing ids `>= logical` are shifted up by one so the permutation
    /// stays dense.
    pub fn insert(&mut self, display: u32, logical: u32) -> Result<()> {
        self.order
            .try_reserve(1)
            .map_err(|_| GridError::AllocationFailure {
                requested: self.order.len() + 1,
            })?;
        for id in &mut self.order {
            if *id >= logical {
                *id += 1;
            }
        }
        let display = (display as usize).min(self.order.len());
        self.order.insert(display, logical);
        Ok(())
    }

    /// Remove the entry at display position `display`, returning its logical
    /// id. Ids above it shift down by one.
    pub fn remove(&mut self, display: u32) -> Option<u32> {
        let display = display as usize;
        if display >= self.order.len() {
            return None;
        }
        let logical = self.order.remove(display);
        for id in &mut self.order {
            if *id > logical {
                *id -= 1;
            }
        }
        Some(logical)
    }

    /// Stable sort of display positions `start..` by comparing logical ids.
    pub fn sort_tail_by<F>(&mut self, start: u32, mut compare: F)
    where
        F: FnMut(u32, u32) -> Ordering,
    {
        if let Some(tail) = self.order.get_mut(start as usize..) {
            tail.sort_by(|&a, &b| compare(a, b));
        }
    }

    /// Replace the order if `order` is a permutation of `0..len`.
    pub fn set_order(&mut self, order: Vec<u32>) -> bool {
        let mut seen = vec![false; order.len()];
        for &id in &order {
            match seen.get_mut(id as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        self.order = order;
        true
    }
}
