//! Observers that record propagation callbacks.

use brushfire_core::{PropagationObserver, UpdateReport};
use glam::IVec3;

/// Records every callback in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub lowered: Vec<(IVec3, i32)>,
    pub raised: Vec<IVec3>,
    pub batches: Vec<UpdateReport>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.lowered.clear();
        self.raised.clear();
        self.batches.clear();
    }
}

impl PropagationObserver for RecordingObserver {
    fn on_lowered(&mut self, cell: IVec3, dist_sqrd: i32) {
        self.lowered.push((cell, dist_sqrd));
    }

    fn on_raised(&mut self, cell: IVec3) {
        self.raised.push(cell);
    }

    fn on_batch_complete(&mut self, report: &UpdateReport) {
        self.batches.push(report.clone());
    }
}
