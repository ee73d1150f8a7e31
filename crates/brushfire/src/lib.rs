//! Brushfire: incremental 3D Euclidean distance maps.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Brushfire sub-crates. For most users, adding `brushfire` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use brushfire::prelude::*;
//!
//! // A 10 m cube at 1 m cells, tracking distances up to 6 m.
//! let config = DistanceMapConfig::new(DVec3::ZERO, DVec3::splat(10.0), 1.0, 6.0);
//! let mut map = DistanceMap::new(config).unwrap();
//!
//! map.add_points_to_map(&[DVec3::splat(2.0), DVec3::splat(7.0)]);
//! assert_eq!(map.squared_cell_distance(IVec3::splat(4)), Some(12));
//!
//! // Removing an obstacle repairs only the affected region.
//! let report = map.remove_points_from_map(&[DVec3::splat(2.0)]);
//! assert_eq!(report.obstacles_removed, 1);
//! assert_eq!(map.squared_cell_distance(IVec3::splat(4)), Some(27));
//!
//! // Collision code can hold any implementation behind the trait.
//! let field: Box<dyn DistanceField> = Box::new(map);
//! assert_eq!(field.cell_distance(IVec3::splat(7)), 0.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `brushfire-core` | Config, errors, `DistanceField`, observers, reports |
//! | [`grid`] | `brushfire-grid` | Grid storage, geometry, neighbour tables |
//! | [`engine`] | `brushfire-engine` | Incremental `DistanceMap` and its bucket queue |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`brushfire-core`).
///
/// Contains [`types::DistanceMapConfig`], [`types::ConfigError`], the
/// [`types::DistanceField`] trait, and [`types::PropagationObserver`].
pub use brushfire_core as types;

/// Voxel storage and lattice topology (`brushfire-grid`).
///
/// [`grid::Grid3`], [`grid::GridGeometry`], [`grid::SqrtTable`], and
/// [`grid::NeighborTable`].
pub use brushfire_grid as grid;

/// The incremental propagation engine (`brushfire-engine`).
///
/// [`engine::DistanceMap`] and [`engine::BucketQueue`].
pub use brushfire_engine as engine;

/// Common imports for typical Brushfire usage.
///
/// ```rust
/// use brushfire::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use brushfire_core::{
        CellChange, DistanceField, DistanceMapConfig, NoopObserver, PropagationObserver,
        UpdateReport,
    };

    // Errors
    pub use brushfire_core::ConfigError;

    // Coordinates
    pub use brushfire_core::{DVec3, IVec3};

    // Engine
    pub use brushfire_engine::DistanceMap;
}
