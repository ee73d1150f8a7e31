//! Per-batch update reports.
//!
//! [`UpdateReport`] captures what one `add`/`remove`/`update` call did to the
//! map, for telemetry and for callers that need to react to changed cells.

use glam::IVec3;

/// One cell whose distance changed during an update batch.
///
/// Distances are squared and in cell units, exactly as stored. A value equal
/// to the map's squared distance bound means "at or beyond the maximum".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    /// Grid coordinate of the cell.
    pub cell: IVec3,
    /// Squared distance before the batch.
    pub old_sqrd: i32,
    /// Squared distance after the batch.
    pub new_sqrd: i32,
}

impl CellChange {
    /// `true` if the cell moved closer to an obstacle.
    pub fn is_lowered(&self) -> bool {
        self.new_sqrd < self.old_sqrd
    }
}

/// Counters and (optionally) changed cells for one update batch.
///
/// The `changed` list is only populated when the map was built with change
/// tracking enabled; otherwise it stays empty and costs nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Cells that became obstacles.
    pub obstacles_added: usize,
    /// Obstacle cells that were cleared.
    pub obstacles_removed: usize,
    /// Cells invalidated by the removal cascade.
    pub cells_raised: usize,
    /// Cells whose committed distance decreased.
    pub cells_lowered: usize,
    /// Cells extracted from the bucket queue.
    pub queue_pops: usize,
    /// Cells whose distance differs from before the batch, in first-touch order.
    pub changed: Vec<CellChange>,
}

impl UpdateReport {
    /// `true` if the batch neither added nor removed any obstacle.
    pub fn is_noop(&self) -> bool {
        self.obstacles_added == 0 && self.obstacles_removed == 0
    }
}
