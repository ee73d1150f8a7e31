//! Per-voxel propagation state.

use crate::bucket::{Bucketed, NOT_QUEUED};
use brushfire_grid::Direction;
use glam::IVec3;

/// `dist_new` marker for the padding ring. Every candidate distance is
/// non-negative, so a border cell is never relaxed.
pub(crate) const BORDER_DIST: i32 = -1;

/// One cell of the padded grid.
///
/// `coords` are interior grid coordinates; border cells sit at `-1` or `n`
/// on some axis. `obs` is the flat index of the nearest obstacle cell, and
/// a cell is an obstacle exactly when `obs` points at itself.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    pub(crate) coords: IVec3,
    /// Committed squared distance in cells.
    pub(crate) dist: i32,
    /// Staged squared distance, committed when the cell is extracted.
    pub(crate) dist_new: i32,
    pub(crate) obs: Option<u32>,
    pub(crate) bucket: u32,
    /// Neighbour subset to expand when extracted.
    pub(crate) dir: Direction,
    /// Own flat index.
    pub(crate) pos: u32,
}

impl Cell {
    /// An unobstructed interior cell.
    pub(crate) fn clear(coords: IVec3, pos: u32, dmax_sqrd: i32) -> Self {
        Self {
            coords,
            dist: dmax_sqrd,
            dist_new: dmax_sqrd,
            obs: None,
            bucket: NOT_QUEUED,
            dir: Direction::FULL,
            pos,
        }
    }

    /// A padding cell.
    pub(crate) fn border(coords: IVec3, pos: u32, dmax_sqrd: i32) -> Self {
        Self {
            dist_new: BORDER_DIST,
            ..Self::clear(coords, pos, dmax_sqrd)
        }
    }

    #[inline]
    pub(crate) fn is_border(&self) -> bool {
        self.dist_new == BORDER_DIST
    }

    /// Points at itself as its own nearest obstacle.
    #[inline]
    pub(crate) fn is_obstacle(&self) -> bool {
        self.obs == Some(self.pos)
    }
}

impl Bucketed for Cell {
    #[inline]
    fn bucket(&self) -> u32 {
        self.bucket
    }

    #[inline]
    fn set_bucket(&mut self, bucket: u32) {
        self.bucket = bucket;
    }
}
