//! Brute-force distance field used as a test oracle.

use brushfire_core::{ConfigError, DistanceField, DistanceMapConfig, UpdateReport};
use brushfire_grid::{GridGeometry, SqrtTable};
use glam::{DVec3, IVec3};
use indexmap::IndexSet;

/// A [`DistanceField`] that stores only the obstacle set and answers every
/// query by scanning it.
///
/// Shares the engine's conventions exactly: same cell mapping, same squared
/// distance bound, same lookup table, so distances compare with `==`.
#[derive(Clone, Debug)]
pub struct ReferenceDistanceMap {
    geometry: GridGeometry,
    max_distance: f64,
    dmax_sqrd: i32,
    sqrt_table: SqrtTable,
    obstacles: IndexSet<IVec3>,
}

impl ReferenceDistanceMap {
    pub fn new(config: DistanceMapConfig) -> Result<Self, ConfigError> {
        let geometry = GridGeometry::new(&config)?;
        let dmax_int = config.max_distance_cells() as i32;
        let dmax_sqrd = dmax_int * dmax_int;
        Ok(Self {
            geometry,
            max_distance: config.max_distance,
            dmax_sqrd,
            sqrt_table: SqrtTable::new(dmax_sqrd as u32, config.resolution),
            obstacles: IndexSet::new(),
        })
    }

    /// Clamped minimum squared distance to any obstacle, or `None` for an
    /// invalid cell.
    pub fn squared_cell_distance(&self, cell: IVec3) -> Option<i32> {
        if !self.geometry.is_cell_valid(cell) {
            return None;
        }
        let best = self
            .obstacles
            .iter()
            .map(|&o| {
                let dx = i64::from(cell.x) - i64::from(o.x);
                let dy = i64::from(cell.y) - i64::from(o.y);
                let dz = i64::from(cell.z) - i64::from(o.z);
                dx * dx + dy * dy + dz * dz
            })
            .min()
            .unwrap_or(i64::MAX);
        Some(best.min(i64::from(self.dmax_sqrd)) as i32)
    }

    pub fn is_obstacle(&self, cell: IVec3) -> bool {
        self.obstacles.contains(&cell)
    }

    /// Obstacle cells in insertion order.
    pub fn obstacles(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.obstacles.iter().copied()
    }

    pub fn squared_distance_bound(&self) -> i32 {
        self.dmax_sqrd
    }

    fn cells(&self, points: &[DVec3]) -> IndexSet<IVec3> {
        points
            .iter()
            .filter_map(|&p| self.geometry.cell_of(p))
            .collect()
    }
}

impl DistanceField for ReferenceDistanceMap {
    fn add_points_to_map(&mut self, points: &[DVec3]) -> UpdateReport {
        let mut report = UpdateReport::default();
        for cell in self.cells(points) {
            if self.obstacles.insert(cell) {
                report.obstacles_added += 1;
            }
        }
        report
    }

    fn remove_points_from_map(&mut self, points: &[DVec3]) -> UpdateReport {
        let mut report = UpdateReport::default();
        for cell in self.cells(points) {
            if self.obstacles.shift_remove(&cell) {
                report.obstacles_removed += 1;
            }
        }
        report
    }

    fn update_points_in_map(&mut self, old_points: &[DVec3], new_points: &[DVec3]) -> UpdateReport {
        let old = self.cells(old_points);
        let new = self.cells(new_points);
        let mut report = UpdateReport::default();
        for cell in old.difference(&new) {
            if self.obstacles.shift_remove(cell) {
                report.obstacles_removed += 1;
            }
        }
        for &cell in new.difference(&old) {
            if self.obstacles.insert(cell) {
                report.obstacles_added += 1;
            }
        }
        report
    }

    fn reset(&mut self) {
        self.obstacles.clear();
    }

    fn num_cells_x(&self) -> i32 {
        self.geometry.dims().x
    }

    fn num_cells_y(&self) -> i32 {
        self.geometry.dims().y
    }

    fn num_cells_z(&self) -> i32 {
        self.geometry.dims().z
    }

    fn origin(&self) -> DVec3 {
        self.geometry.origin()
    }

    fn size(&self) -> DVec3 {
        self.geometry.size()
    }

    fn resolution(&self) -> f64 {
        self.geometry.resolution()
    }

    fn uninitialized_distance(&self) -> f64 {
        self.max_distance
    }

    fn metric_distance(&self, point: DVec3) -> f64 {
        self.cell_distance(self.geometry.world_to_grid(point))
    }

    fn cell_distance(&self, cell: IVec3) -> f64 {
        match self.squared_cell_distance(cell) {
            Some(d) if d < self.dmax_sqrd => self
                .sqrt_table
                .get(d as u32)
                .map_or(self.max_distance, |m| m.min(self.max_distance)),
            _ => self.max_distance,
        }
    }

    fn grid_to_world(&self, cell: IVec3) -> DVec3 {
        self.geometry.grid_to_world(cell)
    }

    fn world_to_grid(&self, point: DVec3) -> IVec3 {
        self.geometry.world_to_grid(point)
    }

    fn is_cell_valid(&self, cell: IVec3) -> bool {
        self.geometry.is_cell_valid(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_for_nearest() {
        let config = DistanceMapConfig::new(DVec3::ZERO, DVec3::splat(10.0), 1.0, 5.0);
        let mut map = ReferenceDistanceMap::new(config).unwrap();
        map.add_points_to_map(&[DVec3::splat(2.5), DVec3::splat(7.5)]);
        assert_eq!(map.squared_cell_distance(IVec3::new(4, 4, 4)), Some(12));
        assert_eq!(map.squared_cell_distance(IVec3::new(0, 0, 9)), Some(25));
        map.remove_points_from_map(&[DVec3::splat(2.5)]);
        assert_eq!(map.cell_distance(IVec3::new(7, 7, 8)), 1.0);
        assert_eq!(map.squared_cell_distance(IVec3::new(3, 3, 3)), Some(25));
    }

    #[test]
    fn empty_reads_max() {
        let config = DistanceMapConfig::new(DVec3::ZERO, DVec3::splat(4.0), 0.5, 1.0);
        let map = ReferenceDistanceMap::new(config).unwrap();
        assert_eq!(map.cell_distance(IVec3::ONE), 1.0);
        assert_eq!(map.squared_cell_distance(IVec3::splat(8)), None);
    }
}
