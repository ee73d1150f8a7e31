//! The polymorphic distance map interface.

use crate::report::UpdateReport;
use glam::{DVec3, IVec3};
use std::any::Any;

/// Central abstraction consumed by collision checking and planning code.
///
/// Answers "how far is this point or cell from the nearest known obstacle",
/// clamped to a configured maximum. Concrete implementations (the incremental
/// engine, the brute-force reference map) are interchangeable behind
/// `Box<dyn DistanceField>`.
///
/// # Conventions
///
/// - World points are metres in the map frame; grid cells are integer
///   `(x, y, z)` indices in `[0, nx) × [0, ny) × [0, nz)`.
/// - Mutations ignore points that fall outside the grid.
/// - Queries never mutate and return [`uninitialized_distance`](Self::uninitialized_distance)
///   for invalid cells and for cells no obstacle reaches.
///
/// # Object Safety
///
/// Designed for use as `dyn DistanceField`. Use `downcast_ref` to reach
/// implementation-specific API from a trait object.
pub trait DistanceField: Any + Send + 'static {
    /// Mark every in-grid point as an obstacle and settle the map.
    fn add_points_to_map(&mut self, points: &[DVec3]) -> UpdateReport;

    /// Clear every in-grid point that is currently an obstacle and settle the map.
    fn remove_points_from_map(&mut self, points: &[DVec3]) -> UpdateReport;

    /// Replace `old_points` with `new_points` in one batch.
    ///
    /// Cells present in both sets are left untouched.
    fn update_points_in_map(&mut self, old_points: &[DVec3], new_points: &[DVec3])
        -> UpdateReport;

    /// Return every cell to the obstacle-free state.
    fn reset(&mut self);

    /// Cell count along x.
    fn num_cells_x(&self) -> i32;

    /// Cell count along y.
    fn num_cells_y(&self) -> i32;

    /// Cell count along z.
    fn num_cells_z(&self) -> i32;

    /// World position of the grid's minimum corner.
    fn origin(&self) -> DVec3;

    /// Physical extents of the volume, in metres.
    fn size(&self) -> DVec3;

    /// Cell edge length, in metres.
    fn resolution(&self) -> f64;

    /// Distance reported for cells no obstacle reaches (the configured maximum).
    fn uninitialized_distance(&self) -> f64;

    /// Distance in metres from a world point to the nearest obstacle.
    fn metric_distance(&self, point: DVec3) -> f64;

    /// Distance in metres from a grid cell to the nearest obstacle.
    fn cell_distance(&self, cell: IVec3) -> f64;

    /// World position of a cell's centre.
    fn grid_to_world(&self, cell: IVec3) -> DVec3;

    /// Cell containing a world point. May be outside the grid.
    fn world_to_grid(&self, point: DVec3) -> IVec3;

    /// `true` if `cell` lies inside the grid.
    fn is_cell_valid(&self, cell: IVec3) -> bool;
}

impl dyn DistanceField {
    /// Attempt to downcast a trait object to a concrete implementation.
    pub fn downcast_ref<T: DistanceField>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Mutable variant of [`downcast_ref`](Self::downcast_ref).
    pub fn downcast_mut<T: DistanceField>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}
