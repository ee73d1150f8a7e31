//! World↔grid coordinate mapping.
//!
//! Cell `(i, j, k)` covers the half-open box
//! `origin + [i, i+1) × [j, j+1) × [k, k+1) × resolution`. World points map to
//! the cell containing them; cells map back to their centres, so a round
//! trip moves a point by at most half a cell per axis.

use brushfire_core::{ConfigError, DistanceMapConfig};
use glam::{DVec3, IVec3};
use smallvec::SmallVec;

/// Affine mapping between the world frame and integer grid cells.
#[derive(Clone, Debug, PartialEq)]
pub struct GridGeometry {
    origin: DVec3,
    size: DVec3,
    resolution: f64,
    inv_resolution: f64,
    dims: IVec3,
}

impl GridGeometry {
    /// Derive the geometry from a config, validating it first.
    pub fn new(config: &DistanceMapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let [nx, ny, nz] = config.grid_dims();
        // validate() bounds the padded cell count below u32::MAX, so each
        // axis fits comfortably in i32.
        Ok(Self {
            origin: config.origin,
            size: config.size,
            resolution: config.resolution,
            inv_resolution: 1.0 / config.resolution,
            dims: IVec3::new(nx as i32, ny as i32, nz as i32),
        })
    }

    /// Minimum corner of the grid in the world frame.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Configured physical extents.
    pub fn size(&self) -> DVec3 {
        self.size
    }

    /// Cell edge length in metres.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Reciprocal of the resolution.
    pub fn inv_resolution(&self) -> f64 {
        self.inv_resolution
    }

    /// Cell counts along x, y, z.
    pub fn dims(&self) -> IVec3 {
        self.dims
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.dims.x as usize * self.dims.y as usize * self.dims.z as usize
    }

    /// Cell containing `point`. The result may lie outside the grid; NaN
    /// components map to `i32::MIN` so they are never valid.
    pub fn world_to_grid(&self, point: DVec3) -> IVec3 {
        let g = (point - self.origin) * self.inv_resolution;
        IVec3::new(to_cell(g.x), to_cell(g.y), to_cell(g.z))
    }

    /// Centre of `cell` in the world frame.
    pub fn grid_to_world(&self, cell: IVec3) -> DVec3 {
        self.origin + (cell.as_dvec3() + DVec3::splat(0.5)) * self.resolution
    }

    /// `true` if `cell` is inside `[0, nx) × [0, ny) × [0, nz)`.
    pub fn is_cell_valid(&self, cell: IVec3) -> bool {
        cell.cmpge(IVec3::ZERO).all() && cell.cmplt(self.dims).all()
    }

    /// Cell containing `point`, if that cell is inside the grid.
    pub fn cell_of(&self, point: DVec3) -> Option<IVec3> {
        let cell = self.world_to_grid(point);
        self.is_cell_valid(cell).then_some(cell)
    }

    /// The in-grid members of the 26-neighbourhood of `cell`, in
    /// z-then-y-then-x offset order.
    pub fn neighbours(&self, cell: IVec3) -> SmallVec<[IVec3; 26]> {
        let mut out = SmallVec::new();
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    let n = cell + IVec3::new(dx, dy, dz);
                    if self.is_cell_valid(n) {
                        out.push(n);
                    }
                }
            }
        }
        out
    }
}

/// Floor to a cell index, saturating at the `i32` range.
fn to_cell(v: f64) -> i32 {
    if v.is_nan() {
        i32::MIN
    } else {
        // `as` saturates for out-of-range floats.
        v.floor() as i32
    }
}
