//! Distance map configuration and validation.
//!
//! [`DistanceMapConfig`] fully determines the grid: dimensions are
//! `ceil(size / resolution)` per axis, and the integer distance bound that
//! sizes the bucket queue is `ceil(max_distance / resolution)²`.

use crate::error::{Axis, ConfigError};
use glam::DVec3;

/// Number of whole cells needed to cover `extent` at `resolution`.
///
/// Ratios within floating-point noise of an integer are treated as exact,
/// so a 1.0 m extent at 0.1 m resolution yields 10 cells rather than 11.
/// Never returns less than 1.
pub fn cells_along(extent: f64, resolution: f64) -> u64 {
    let ratio = extent / resolution;
    let nearest = ratio.round();
    let cells = if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) {
        nearest
    } else {
        ratio.ceil()
    };
    (cells as u64).max(1)
}

/// Construction parameters for a distance map.
///
/// Validated at construction; all values are immutable afterwards.
///
/// ```
/// use brushfire_core::{DistanceMapConfig, DVec3};
///
/// let config = DistanceMapConfig::new(DVec3::ZERO, DVec3::splat(2.0), 0.05, 0.4)
///     .with_change_tracking(true);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.grid_dims(), [40, 40, 40]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMapConfig {
    /// World-frame position of the minimum corner of the grid.
    pub origin: DVec3,
    /// Physical extents of the volume along each axis, in metres.
    pub size: DVec3,
    /// Edge length of one cubic cell, in metres.
    pub resolution: f64,
    /// Largest distance the map tracks, in metres. Farther cells read as this value.
    pub max_distance: f64,
    /// Expand only the neighbours consistent with a wavefront's travel
    /// direction. Default: `true`.
    pub direction_pruning: bool,
    /// Report the cells whose distance changed in every
    /// [`UpdateReport`](crate::UpdateReport). Default: `false`.
    pub track_changes: bool,
}

impl DistanceMapConfig {
    /// Largest supported maximum distance, in cells. Bounds the bucket array
    /// at `MAX_DISTANCE_CELLS² + 1` entries.
    pub const MAX_DISTANCE_CELLS: u64 = 1024;

    /// Create a config with direction pruning on and change tracking off.
    pub fn new(origin: DVec3, size: DVec3, resolution: f64, max_distance: f64) -> Self {
        Self {
            origin,
            size,
            resolution,
            max_distance,
            direction_pruning: true,
            track_changes: false,
        }
    }

    /// Enable or disable direction-pruned neighbour expansion.
    pub fn with_direction_pruning(mut self, enabled: bool) -> Self {
        self.direction_pruning = enabled;
        self
    }

    /// Enable or disable changed-cell reporting.
    pub fn with_change_tracking(mut self, enabled: bool) -> Self {
        self.track_changes = enabled;
        self
    }

    /// Cell counts along x, y, z (border excluded).
    ///
    /// Only meaningful for a config that passes [`validate()`](Self::validate).
    pub fn grid_dims(&self) -> [u64; 3] {
        [
            cells_along(self.size.x, self.resolution),
            cells_along(self.size.y, self.resolution),
            cells_along(self.size.z, self.resolution),
        ]
    }

    /// The maximum distance expressed in whole cells, rounded up.
    pub fn max_distance_cells(&self) -> u64 {
        cells_along(self.max_distance, self.resolution)
    }

    /// Check every structural invariant the grid relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(ConfigError::NonPositiveResolution {
                value: self.resolution,
            });
        }
        for (axis, value) in Axis::ALL.into_iter().zip(self.size.to_array()) {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveExtent { axis, value });
            }
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(ConfigError::NonPositiveMaxDistance {
                value: self.max_distance,
            });
        }
        for (axis, value) in Axis::ALL.into_iter().zip(self.origin.to_array()) {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteOrigin { axis, value });
            }
        }

        // One border cell on each side of every axis.
        let cells = self
            .grid_dims()
            .into_iter()
            .try_fold(1u64, |acc, n| acc.checked_mul(n.checked_add(2)?));
        match cells {
            Some(cells) if cells < u64::from(u32::MAX) => {}
            Some(cells) => return Err(ConfigError::GridTooLarge { cells }),
            None => return Err(ConfigError::GridTooLarge { cells: u64::MAX }),
        }

        let dmax = self.max_distance_cells();
        if dmax > Self::MAX_DISTANCE_CELLS {
            return Err(ConfigError::DistanceRangeTooLarge {
                cells: dmax,
                max: Self::MAX_DISTANCE_CELLS,
            });
        }
        Ok(())
    }
}

impl Default for DistanceMapConfig {
    /// A 1 m cube at 2 cm resolution tracking distances up to 20 cm.
    fn default() -> Self {
        Self::new(DVec3::ZERO, DVec3::ONE, 0.02, 0.2)
    }
}
