//! Per-batch changed-cell tracking.

use crate::cell::Cell;
use brushfire_core::CellChange;

const UNTOUCHED: i32 = i32::MIN;

/// Distances as they stood at the start of the current batch.
///
/// Only allocated when change tracking is enabled, so untracked maps carry
/// no per-cell overhead.
#[derive(Clone, Debug)]
pub(crate) struct ChangeLog {
    dist_old: Vec<i32>,
    touched: Vec<u32>,
}

impl ChangeLog {
    pub(crate) fn new(cells: usize) -> Self {
        Self {
            dist_old: vec![UNTOUCHED; cells],
            touched: Vec::new(),
        }
    }

    /// Remember `old` as the batch-start distance of `index`, unless the
    /// cell was already touched this batch.
    #[inline]
    pub(crate) fn record(&mut self, index: usize, old: i32) {
        let slot = &mut self.dist_old[index];
        if *slot == UNTOUCHED {
            *slot = old;
            self.touched.push(index as u32);
        }
    }

    /// Emit cells whose committed distance differs from the batch start, in
    /// first-touch order, and forget the batch.
    pub(crate) fn finish(&mut self, cells: &[Cell]) -> Vec<CellChange> {
        let mut changed = Vec::new();
        for index in self.touched.drain(..) {
            let index = index as usize;
            let old = std::mem::replace(&mut self.dist_old[index], UNTOUCHED);
            let cell = &cells[index];
            if old != cell.dist {
                changed.push(CellChange {
                    cell: cell.coords,
                    old_sqrd: old,
                    new_sqrd: cell.dist,
                });
            }
        }
        changed
    }

    pub(crate) fn clear(&mut self) {
        for index in self.touched.drain(..) {
            self.dist_old[index as usize] = UNTOUCHED;
        }
    }
}
