//! Error types for distance map construction.
//!
//! Propagation itself has no recoverable failures: out-of-grid points are
//! dropped and out-of-grid queries return the maximum distance. The only
//! fallible step is turning a [`DistanceMapConfig`](crate::DistanceMapConfig)
//! into a grid.

use std::error::Error;
use std::fmt;

/// A spatial axis, used to point at the offending component of a vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// All three axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Errors detected by [`DistanceMapConfig::validate()`](crate::DistanceMapConfig::validate).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Resolution is NaN, infinite, zero, or negative.
    NonPositiveResolution {
        /// The invalid value.
        value: f64,
    },
    /// A physical extent is NaN, infinite, zero, or negative.
    NonPositiveExtent {
        /// Which extent was invalid.
        axis: Axis,
        /// The invalid value.
        value: f64,
    },
    /// Maximum tracked distance is NaN, infinite, zero, or negative.
    NonPositiveMaxDistance {
        /// The invalid value.
        value: f64,
    },
    /// An origin component is NaN or infinite.
    NonFiniteOrigin {
        /// Which component was invalid.
        axis: Axis,
        /// The invalid value.
        value: f64,
    },
    /// The padded grid has more cells than a `u32` cell index can address.
    GridTooLarge {
        /// Number of cells the grid would need, border included.
        cells: u64,
    },
    /// The maximum distance spans more cells than the bucket queue supports.
    DistanceRangeTooLarge {
        /// Maximum distance expressed in whole cells.
        cells: u64,
        /// Upper bound on that value.
        max: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveResolution { value } => {
                write!(f, "resolution must be finite and positive, got {value}")
            }
            Self::NonPositiveExtent { axis, value } => {
                write!(f, "size_{axis} must be finite and positive, got {value}")
            }
            Self::NonPositiveMaxDistance { value } => {
                write!(f, "max_distance must be finite and positive, got {value}")
            }
            Self::NonFiniteOrigin { axis, value } => {
                write!(f, "origin_{axis} must be finite, got {value}")
            }
            Self::GridTooLarge { cells } => {
                write!(f, "grid needs {cells} cells, exceeding the u32 index space")
            }
            Self::DistanceRangeTooLarge { cells, max } => {
                write!(f, "max_distance spans {cells} cells, limit is {max}")
            }
        }
    }
}

impl Error for ConfigError {}
