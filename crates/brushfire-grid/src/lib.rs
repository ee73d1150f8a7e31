//! Voxel storage and lattice topology for Brushfire distance maps.
//!
//! Everything here is independent of the propagation algorithm:
//!
//! - [`Grid3`]: dense, x-fastest 3D array with O(1) index arithmetic.
//! - [`GridGeometry`]: world↔grid affine mapping and validity checks.
//! - [`SqrtTable`]: squared-cell-distance → metres lookup.
//! - [`NeighborTable`]: 26-connected offsets partitioned into
//!   direction-pruned subsets, with flat offsets for a padded grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod geometry;
pub mod grid3;
pub mod neighbors;
pub mod sqrt_table;

pub use geometry::GridGeometry;
pub use grid3::Grid3;
pub use neighbors::{Direction, NeighborTable};
pub use sqrt_table::SqrtTable;
