//! Configs, seeded point clouds, and field comparison helpers.

use brushfire_core::{DistanceField, DistanceMapConfig};
use glam::{DVec3, IVec3};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// An `n`-cell cube at 1 m resolution anchored at the origin, tracking
/// `max_cells` cells of distance.
pub fn unit_config(n: u32, max_cells: f64) -> DistanceMapConfig {
    DistanceMapConfig::new(DVec3::ZERO, DVec3::splat(f64::from(n)), 1.0, max_cells)
}

/// World-frame centres of `cells` in `field`.
pub fn cell_centres(field: &dyn DistanceField, cells: &[IVec3]) -> Vec<DVec3> {
    cells.iter().map(|&c| field.grid_to_world(c)).collect()
}

/// `count` cells drawn uniformly from a grid of `dims`. May repeat.
pub fn random_cells(dims: IVec3, count: usize, seed: u64) -> Vec<IVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            IVec3::new(
                rng.random_range(0..dims.x),
                rng.random_range(0..dims.y),
                rng.random_range(0..dims.z),
            )
        })
        .collect()
}

/// `count` world points drawn uniformly from the configured volume.
pub fn random_points(config: &DistanceMapConfig, count: usize, seed: u64) -> Vec<DVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let unit = DVec3::new(rng.random(), rng.random(), rng.random());
            config.origin + unit * config.size
        })
        .collect()
}

/// Every valid cell of `field`, z-then-y-then-x.
pub fn all_cells(field: &dyn DistanceField) -> impl Iterator<Item = IVec3> {
    let (nx, ny, nz) = (field.num_cells_x(), field.num_cells_y(), field.num_cells_z());
    (0..nz).flat_map(move |z| (0..ny).flat_map(move |y| (0..nx).map(move |x| IVec3::new(x, y, z))))
}

/// First cell where the two fields disagree, with both distances.
pub fn first_mismatch(
    a: &dyn DistanceField,
    b: &dyn DistanceField,
) -> Option<(IVec3, f64, f64)> {
    all_cells(a).find_map(|c| {
        let (da, db) = (a.cell_distance(c), b.cell_distance(c));
        (da != db).then_some((c, da, db))
    })
}
