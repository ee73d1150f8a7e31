//! Benchmark profiles for the Brushfire distance map.
//!
//! Provides pre-built [`DistanceMapConfig`] profiles and deterministic
//! obstacle scenes for benchmarking:
//!
//! - [`reference_profile`]: 2 m cube at 2 cm cells (1M cells), 20 cm range
//! - [`stress_profile`]: 3 m × 3 m × 1.5 m at 2 cm cells (1.7M cells), 30 cm range
//! - [`plane_scene`]: a horizontal sensor-like sheet of points
//! - [`scattered_scene`]: uniform random points via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use brushfire_core::{ConfigError, DistanceMapConfig};
use brushfire_engine::DistanceMap;
use brushfire_test_utils::fixtures::random_points;
use glam::DVec3;

/// 100×100×100 cells at 2 cm, tracking 10 cells of distance.
pub fn reference_profile() -> DistanceMapConfig {
    DistanceMapConfig::new(DVec3::ZERO, DVec3::splat(2.0), 0.02, 0.2)
}

/// 150×150×75 cells at 2 cm, tracking 15 cells of distance.
pub fn stress_profile() -> DistanceMapConfig {
    DistanceMapConfig::new(DVec3::ZERO, DVec3::new(3.0, 3.0, 1.5), 0.02, 0.3)
}

/// A sheet of points at height `z`, one per cell over the middle half of
/// the volume, shifted along x by `shift` metres.
pub fn plane_scene(config: &DistanceMapConfig, z: f64, shift: f64) -> Vec<DVec3> {
    let res = config.resolution;
    let lo = config.origin + config.size * 0.25;
    let hi = config.origin + config.size * 0.75;
    let nx = ((hi.x - lo.x) / res).round() as usize;
    let ny = ((hi.y - lo.y) / res).round() as usize;
    let mut points = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            points.push(DVec3::new(
                lo.x + (i as f64 + 0.5) * res + shift,
                lo.y + (j as f64 + 0.5) * res,
                config.origin.z + z,
            ));
        }
    }
    points
}

/// `count` uniform random points inside the volume.
pub fn scattered_scene(config: &DistanceMapConfig, count: usize, seed: u64) -> Vec<DVec3> {
    random_points(config, count, seed)
}

/// A map for `config` with `points` already inserted.
pub fn settled_map(
    config: DistanceMapConfig,
    points: &[DVec3],
) -> Result<DistanceMap, ConfigError> {
    let mut map = DistanceMap::new(config)?;
    map.add_points_to_map(points);
    Ok(map)
}
