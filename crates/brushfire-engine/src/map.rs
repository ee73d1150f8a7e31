//! The incremental distance map.

use crate::bucket::{BucketQueue, NOT_QUEUED};
use crate::cell::Cell;
use crate::changes::ChangeLog;
use crate::propagate::squared_distance;
use brushfire_core::{
    ConfigError, DistanceField, DistanceMapConfig, NoopObserver, PropagationObserver,
    UpdateReport,
};
use brushfire_grid::{Grid3, GridGeometry, NeighborTable, SqrtTable};
use glam::{DVec3, IVec3};
use indexmap::IndexSet;
use smallvec::SmallVec;

/// Incrementally maintained 3D Euclidean distance map.
///
/// Every cell stores the squared distance (in cells) to its nearest obstacle
/// cell, clamped at the configured maximum. Adding, removing or replacing
/// obstacle points only touches the cells whose distance actually changes.
///
/// The grid carries a one-cell padding ring on every side so neighbour
/// arithmetic never needs bounds checks. Cell storage is allocated at
/// construction and both removal worklists reserve one entry per cell.
/// Queue buckets grow to their working size during the first updates. All
/// of it is reused by later updates and by [`reset`](Self::reset).
///
/// `O` receives propagation callbacks; the default [`NoopObserver`] compiles
/// away.
///
/// ```
/// use brushfire_core::{DistanceMapConfig, DVec3, IVec3};
/// use brushfire_engine::DistanceMap;
///
/// let config = DistanceMapConfig::new(DVec3::ZERO, DVec3::splat(10.0), 1.0, 5.0);
/// let mut map = DistanceMap::new(config)?;
/// map.add_points_to_map(&[DVec3::new(5.0, 5.0, 5.0)]);
///
/// assert_eq!(map.cell_distance(IVec3::new(5, 5, 5)), 0.0);
/// assert_eq!(map.cell_distance(IVec3::new(6, 5, 5)), 1.0);
/// assert_eq!(map.cell_distance(IVec3::new(0, 0, 0)), 5.0);
/// # Ok::<(), brushfire_core::ConfigError>(())
/// ```
pub struct DistanceMap<O: PropagationObserver = NoopObserver> {
    pub(crate) config: DistanceMapConfig,
    pub(crate) geometry: GridGeometry,
    pub(crate) cells: Grid3<Cell>,
    pub(crate) queue: BucketQueue,
    pub(crate) neighbors: NeighborTable,
    pub(crate) sqrt_table: SqrtTable,
    pub(crate) dmax_sqrd: i32,
    pub(crate) rem_stack: Vec<usize>,
    pub(crate) border_seeds: Vec<usize>,
    pub(crate) changes: Option<ChangeLog>,
    pub(crate) report: UpdateReport,
    pub(crate) observer: O,
}

impl DistanceMap {
    /// Allocate an obstacle-free map.
    pub fn new(config: DistanceMapConfig) -> Result<Self, ConfigError> {
        Self::with_observer(config, NoopObserver)
    }
}

impl<O: PropagationObserver> DistanceMap<O> {
    /// Allocate an obstacle-free map that reports to `observer`.
    pub fn with_observer(config: DistanceMapConfig, observer: O) -> Result<Self, ConfigError> {
        let geometry = GridGeometry::new(&config)?;
        let dims = geometry.dims();
        // validate() caps the distance at MAX_DISTANCE_CELLS, so this fits.
        let dmax_int = config.max_distance_cells() as i32;
        let dmax_sqrd = dmax_int * dmax_int;

        let (px, py, pz) = (
            dims.x as usize + 2,
            dims.y as usize + 2,
            dims.z as usize + 2,
        );
        let cells = Grid3::from_fn(px, py, pz, |x, y, z| {
            let coords = IVec3::new(x as i32 - 1, y as i32 - 1, z as i32 - 1);
            let pos = (x + px * (y + py * z)) as u32;
            if geometry.is_cell_valid(coords) {
                Cell::clear(coords, pos, dmax_sqrd)
            } else {
                Cell::border(coords, pos, dmax_sqrd)
            }
        });
        let neighbors = NeighborTable::new(cells.stride_y(), cells.stride_z());
        let cell_count = cells.len();
        let changes = config.track_changes.then(|| ChangeLog::new(cell_count));

        tracing::debug!(
            nx = dims.x,
            ny = dims.y,
            nz = dims.z,
            padded_cells = cells.len(),
            dmax_sqrd,
            direction_pruning = config.direction_pruning,
            track_changes = config.track_changes,
            "distance map allocated"
        );

        Ok(Self {
            queue: BucketQueue::new(dmax_sqrd as u32),
            sqrt_table: SqrtTable::new(dmax_sqrd as u32, config.resolution),
            config,
            geometry,
            cells,
            neighbors,
            dmax_sqrd,
            rem_stack: Vec::with_capacity(cell_count),
            border_seeds: Vec::with_capacity(cell_count),
            changes,
            report: UpdateReport::default(),
            observer,
        })
    }

    // ── Updates ─────────────────────────────────────────────────

    /// Mark the cells containing `points` as obstacles and settle the map.
    ///
    /// Points outside the grid and cells that already are obstacles are
    /// ignored.
    pub fn add_points_to_map(&mut self, points: &[DVec3]) -> UpdateReport {
        let targets = self.resolve(points);
        for index in targets {
            self.add_obstacle(index);
        }
        self.propagate();
        self.finish_batch("add")
    }

    /// Clear the obstacle cells containing `points` and settle the map.
    ///
    /// Points outside the grid and cells that are not obstacles are ignored.
    pub fn remove_points_from_map(&mut self, points: &[DVec3]) -> UpdateReport {
        let targets = self.resolve(points);
        for index in targets {
            self.remove_obstacle(index);
        }
        self.propagate_removals();
        self.propagate_border();
        self.propagate();
        self.finish_batch("remove")
    }

    /// Replace the obstacles at `old_points` with those at `new_points`.
    ///
    /// Both sets are reduced to cells and differenced first, so cells in
    /// both are never touched. Removals cascade before insertions are
    /// seeded, and a single drain settles both.
    pub fn update_points_in_map(
        &mut self,
        old_points: &[DVec3],
        new_points: &[DVec3],
    ) -> UpdateReport {
        let old: IndexSet<usize> = self.resolve(old_points).into_iter().collect();
        let new: IndexSet<usize> = self.resolve(new_points).into_iter().collect();

        for &index in old.difference(&new) {
            self.remove_obstacle(index);
        }
        self.propagate_removals();
        for &index in new.difference(&old) {
            self.add_obstacle(index);
        }
        self.propagate_border();
        self.propagate();
        self.finish_batch("update")
    }

    /// Return every cell to the obstacle-free state without reallocating.
    pub fn reset(&mut self) {
        let dmax_sqrd = self.dmax_sqrd;
        for cell in self.cells.iter_mut() {
            *cell = if cell.is_border() {
                Cell::border(cell.coords, cell.pos, dmax_sqrd)
            } else {
                Cell::clear(cell.coords, cell.pos, dmax_sqrd)
            };
        }
        self.queue.clear();
        self.rem_stack.clear();
        self.border_seeds.clear();
        if let Some(log) = self.changes.as_mut() {
            log.clear();
        }
        self.report = UpdateReport::default();
        tracing::debug!(cells = self.cells.len(), "distance map reset");
    }

    fn add_obstacle(&mut self, index: usize) {
        if self.cells[index].is_obstacle() {
            return;
        }
        self.seed_obstacle(index);
        self.report.obstacles_added += 1;
    }

    fn remove_obstacle(&mut self, index: usize) {
        if !self.cells[index].is_obstacle() {
            return;
        }
        self.raise(index);
        self.report.obstacles_removed += 1;
        self.rem_stack.push(index);
    }

    /// Flat indices of the in-grid points, in input order.
    fn resolve(&self, points: &[DVec3]) -> SmallVec<[usize; 32]> {
        points
            .iter()
            .filter_map(|&p| self.geometry.cell_of(p))
            .map(|c| self.flat_index(c))
            .collect()
    }

    fn finish_batch(&mut self, kind: &'static str) -> UpdateReport {
        debug_assert!(self.queue.is_empty());
        debug_assert!(self.rem_stack.is_empty());
        let mut report = std::mem::take(&mut self.report);
        if let Some(log) = self.changes.as_mut() {
            report.changed = log.finish(self.cells.as_slice());
        }
        tracing::trace!(
            kind,
            added = report.obstacles_added,
            removed = report.obstacles_removed,
            raised = report.cells_raised,
            lowered = report.cells_lowered,
            pops = report.queue_pops,
            changed = report.changed.len(),
            "update batch settled"
        );
        self.observer.on_batch_complete(&report);
        report
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Distance in metres from a world point to the nearest obstacle.
    /// Alias of [`metric_distance`](Self::metric_distance).
    pub fn distance(&self, point: DVec3) -> f64 {
        self.metric_distance(point)
    }

    /// Distance in metres from a world point to the nearest obstacle, or
    /// [`max_distance`](Self::max_distance) outside the grid.
    pub fn metric_distance(&self, point: DVec3) -> f64 {
        self.cell_distance(self.world_to_grid(point))
    }

    /// Distance in metres from a cell to the nearest obstacle, clamped to
    /// [`max_distance`](Self::max_distance). Invalid and unreached cells
    /// read as the maximum.
    pub fn cell_distance(&self, cell: IVec3) -> f64 {
        let max = self.max_distance();
        match self.squared_cell_distance(cell) {
            Some(d) if d < self.dmax_sqrd => self
                .sqrt_table
                .get(d as u32)
                .map_or(max, |metres| metres.min(max)),
            _ => max,
        }
    }

    /// Raw squared distance in cells, or `None` for an invalid cell.
    /// Unreached cells hold [`squared_distance_bound`](Self::squared_distance_bound).
    pub fn squared_cell_distance(&self, cell: IVec3) -> Option<i32> {
        self.valid_index(cell).map(|i| self.cells[i].dist)
    }

    /// `true` if `cell` is currently an obstacle.
    pub fn is_obstacle(&self, cell: IVec3) -> bool {
        self.valid_index(cell)
            .is_some_and(|i| self.cells[i].is_obstacle())
    }

    /// The obstacle cell `cell` measures its distance to, if any obstacle
    /// is within range. Among equidistant obstacles the choice is
    /// deterministic for a fixed update sequence.
    pub fn nearest_obstacle(&self, cell: IVec3) -> Option<IVec3> {
        let i = self.valid_index(cell)?;
        let obs = self.cells[i].obs?;
        Some(self.cells[obs as usize].coords)
    }

    /// Every obstacle cell, in x-fastest grid order.
    pub fn obstacle_cells(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.cells
            .iter()
            .filter(|c| c.is_obstacle())
            .map(|c| c.coords)
    }

    /// Centre of `cell` in the world frame.
    pub fn grid_to_world(&self, cell: IVec3) -> DVec3 {
        self.geometry.grid_to_world(cell)
    }

    /// Cell containing `point`; may be outside the grid.
    pub fn world_to_grid(&self, point: DVec3) -> IVec3 {
        self.geometry.world_to_grid(point)
    }

    /// `true` if `cell` lies inside the grid.
    pub fn is_cell_valid(&self, cell: IVec3) -> bool {
        self.geometry.is_cell_valid(cell)
    }

    // ── Introspection ───────────────────────────────────────────

    /// Cell count along x.
    pub fn num_cells_x(&self) -> i32 {
        self.geometry.dims().x
    }

    /// Cell count along y.
    pub fn num_cells_y(&self) -> i32 {
        self.geometry.dims().y
    }

    /// Cell count along z.
    pub fn num_cells_z(&self) -> i32 {
        self.geometry.dims().z
    }

    /// The configured maximum distance in metres.
    pub fn max_distance(&self) -> f64 {
        self.config.max_distance
    }

    /// Distance reported for cells no obstacle reaches.
    pub fn uninitialized_distance(&self) -> f64 {
        self.max_distance()
    }

    /// Squared cell distance that stands for "at or beyond the maximum".
    pub fn squared_distance_bound(&self) -> i32 {
        self.dmax_sqrd
    }

    /// Cell edge length in metres.
    pub fn resolution(&self) -> f64 {
        self.geometry.resolution()
    }

    /// World position of the grid's minimum corner.
    pub fn origin(&self) -> DVec3 {
        self.geometry.origin()
    }

    /// Configured physical extents.
    pub fn size(&self) -> DVec3 {
        self.geometry.size()
    }

    /// The validated construction parameters.
    pub fn config(&self) -> &DistanceMapConfig {
        &self.config
    }

    /// The propagation observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the propagation observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the map and return its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Sweep the whole grid and check the settled-state invariants:
    ///
    /// - no cell is queued and the removal worklists are empty;
    /// - every cell's distance equals the clamped squared distance to its
    ///   recorded obstacle, and that obstacle still is one;
    /// - no neighbour knows an obstacle strictly closer than the cell's own;
    /// - padding cells are untouched.
    ///
    /// O(cells); intended for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), String> {
        if !self.queue.is_empty() {
            return Err(format!("{} cells still queued", self.queue.len()));
        }
        if !self.rem_stack.is_empty() || !self.border_seeds.is_empty() {
            return Err("removal worklists not drained".to_string());
        }
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.pos as usize != index {
                return Err(format!("cell {:?} stores pos {} at {index}", cell.coords, cell.pos));
            }
            if cell.bucket != NOT_QUEUED {
                return Err(format!("cell {:?} marked queued", cell.coords));
            }
            if cell.is_border() {
                if cell.obs.is_some() || cell.dist != self.dmax_sqrd {
                    return Err(format!("border cell {:?} modified", cell.coords));
                }
                continue;
            }
            if cell.dist != cell.dist_new {
                return Err(format!(
                    "cell {:?} unsettled: dist {} staged {}",
                    cell.coords, cell.dist, cell.dist_new
                ));
            }
            let expected = match cell.obs {
                Some(obs) => {
                    let target = &self.cells[obs as usize];
                    if !target.is_obstacle() {
                        return Err(format!(
                            "cell {:?} points at non-obstacle {:?}",
                            cell.coords, target.coords
                        ));
                    }
                    squared_distance(cell.coords, target.coords, self.dmax_sqrd)
                }
                None => self.dmax_sqrd,
            };
            if cell.dist != expected {
                return Err(format!(
                    "cell {:?} stores {} but its obstacle is at {expected}",
                    cell.coords, cell.dist
                ));
            }
            for n in self.geometry.neighbours(cell.coords) {
                let Some(obs) = self.cells[self.flat_index(n)].obs else {
                    continue;
                };
                let d = squared_distance(cell.coords, self.cells[obs as usize].coords, self.dmax_sqrd);
                if d < cell.dist {
                    return Err(format!(
                        "cell {:?} stores {} but neighbour {n:?} knows an obstacle at {d}",
                        cell.coords, cell.dist
                    ));
                }
            }
        }
        Ok(())
    }

    /// Flat index of an in-grid cell in the padded array.
    #[inline]
    pub(crate) fn flat_index(&self, cell: IVec3) -> usize {
        self.cells.index_of(
            (cell.x + 1) as usize,
            (cell.y + 1) as usize,
            (cell.z + 1) as usize,
        )
    }

    fn valid_index(&self, cell: IVec3) -> Option<usize> {
        self.is_cell_valid(cell).then(|| self.flat_index(cell))
    }
}

impl<O: PropagationObserver + Send + 'static> DistanceField for DistanceMap<O> {
    fn add_points_to_map(&mut self, points: &[DVec3]) -> UpdateReport {
        DistanceMap::add_points_to_map(self, points)
    }

    fn remove_points_from_map(&mut self, points: &[DVec3]) -> UpdateReport {
        DistanceMap::remove_points_from_map(self, points)
    }

    fn update_points_in_map(&mut self, old_points: &[DVec3], new_points: &[DVec3]) -> UpdateReport {
        DistanceMap::update_points_in_map(self, old_points, new_points)
    }

    fn reset(&mut self) {
        DistanceMap::reset(self)
    }

    fn num_cells_x(&self) -> i32 {
        DistanceMap::num_cells_x(self)
    }

    fn num_cells_y(&self) -> i32 {
        DistanceMap::num_cells_y(self)
    }

    fn num_cells_z(&self) -> i32 {
        DistanceMap::num_cells_z(self)
    }

    fn origin(&self) -> DVec3 {
        DistanceMap::origin(self)
    }

    fn size(&self) -> DVec3 {
        DistanceMap::size(self)
    }

    fn resolution(&self) -> f64 {
        DistanceMap::resolution(self)
    }

    fn uninitialized_distance(&self) -> f64 {
        DistanceMap::uninitialized_distance(self)
    }

    fn metric_distance(&self, point: DVec3) -> f64 {
        DistanceMap::metric_distance(self, point)
    }

    fn cell_distance(&self, cell: IVec3) -> f64 {
        DistanceMap::cell_distance(self, cell)
    }

    fn grid_to_world(&self, cell: IVec3) -> DVec3 {
        DistanceMap::grid_to_world(self, cell)
    }

    fn world_to_grid(&self, point: DVec3) -> IVec3 {
        DistanceMap::world_to_grid(self, point)
    }

    fn is_cell_valid(&self, cell: IVec3) -> bool {
        DistanceMap::is_cell_valid(self, cell)
    }
}

impl<O: PropagationObserver> std::fmt::Debug for DistanceMap<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceMap")
            .field("dims", &self.geometry.dims())
            .field("resolution", &self.geometry.resolution())
            .field("max_distance", &self.config.max_distance)
            .field("dmax_sqrd", &self.dmax_sqrd)
            .finish_non_exhaustive()
    }
}
