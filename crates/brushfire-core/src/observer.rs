//! Propagation hooks.
//!
//! A distance map engine is generic over a [`PropagationObserver`]. The
//! observer is a type parameter rather than a trait object, so the default
//! [`NoopObserver`] compiles away entirely and specialised observers pay no
//! dynamic dispatch.

use crate::report::UpdateReport;
use glam::IVec3;

/// Callbacks fired while an update batch propagates.
///
/// All methods have empty default bodies; implement only the ones you need.
/// Callbacks must not assume any ordering between cells beyond "a cell is
/// lowered after every cell with a smaller key was extracted".
pub trait PropagationObserver {
    /// A cell committed a smaller squared distance (cell units).
    fn on_lowered(&mut self, _cell: IVec3, _dist_sqrd: i32) {}

    /// A cell lost its nearest obstacle to a removal and was reset to the
    /// maximum distance, pending re-propagation.
    fn on_raised(&mut self, _cell: IVec3) {}

    /// The batch reached its fixed point.
    fn on_batch_complete(&mut self, _report: &UpdateReport) {}
}

/// Observer that ignores every callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopObserver;

impl PropagationObserver for NoopObserver {}
