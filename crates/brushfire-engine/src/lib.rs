//! Incremental Euclidean distance map for Brushfire.
//!
//! [`DistanceMap`] keeps, for every cell of a padded voxel grid, the squared
//! distance to the nearest obstacle cell and a back-reference to that cell.
//! Updates run a bounded-key wavefront:
//!
//! - **insertion** seeds new obstacles at key 0 and lowers their
//!   neighbourhoods through a [`BucketQueue`], expanding only the
//!   direction-pruned neighbour subset each wavefront needs;
//! - **removal** raises every cell whose obstacle disappeared, cascading
//!   outwards, then re-seeds the cleared region from its still-valid border;
//! - **replacement** differences the old and new point sets so shared cells
//!   are never touched, then runs both in one drain.
//!
//! Queries read the settled grid and never propagate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bucket;
mod cell;
mod changes;
pub mod map;
mod propagate;

pub use bucket::{BucketQueue, Bucketed, NOT_QUEUED};
pub use map::DistanceMap;

pub use brushfire_core::{CellChange, NoopObserver, PropagationObserver, UpdateReport};
