//! Wavefront propagation steps.
//!
//! Insertion seeds obstacle cells at key 0 and `propagate` lowers their
//! neighbourhoods in key order. Removal raises the cleared obstacles, then
//! `propagate_removals` cascades through every cell whose nearest obstacle
//! is gone, collecting the still-valid cells on the edge of the cleared
//! region as border seeds. `propagate_border` re-queues those seeds and the
//! same drain fills the region back in.

use crate::map::DistanceMap;
use brushfire_core::PropagationObserver;
use brushfire_grid::Direction;
use glam::IVec3;

/// Squared distance between two cells, clamped to `dmax_sqrd`.
#[inline]
pub(crate) fn squared_distance(a: IVec3, b: IVec3, dmax_sqrd: i32) -> i32 {
    let dx = i64::from(a.x) - i64::from(b.x);
    let dy = i64::from(a.y) - i64::from(b.y);
    let dz = i64::from(a.z) - i64::from(b.z);
    (dx * dx + dy * dy + dz * dz).min(i64::from(dmax_sqrd)) as i32
}

impl<O: PropagationObserver> DistanceMap<O> {
    /// Make `index` an obstacle and queue it at key 0.
    pub(crate) fn seed_obstacle(&mut self, index: usize) {
        let cell = &mut self.cells[index];
        cell.dist_new = 0;
        cell.obs = Some(index as u32);
        cell.dir = Direction::FULL;
        self.queue.insert(self.cells.as_mut_slice(), index, 0);
    }

    /// Clear `index` back to the maximum distance and drop it from the queue.
    pub(crate) fn raise(&mut self, index: usize) {
        let cell = &mut self.cells[index];
        if cell.dist != self.dmax_sqrd {
            if let Some(log) = self.changes.as_mut() {
                log.record(index, cell.dist);
            }
        }
        cell.dist = self.dmax_sqrd;
        cell.dist_new = self.dmax_sqrd;
        cell.obs = None;
        cell.dir = Direction::FULL;
        let coords = cell.coords;
        self.queue.remove(self.cells.as_mut_slice(), index);
        self.observer.on_raised(coords);
    }

    /// Queue `index` at its staged distance, which must beat its committed
    /// one.
    fn update_vertex(&mut self, index: usize) {
        let cell = &self.cells[index];
        debug_assert!(cell.dist_new < cell.dist, "cell {:?} not lowered", cell.coords);
        let key = cell.dist_new as u32;
        self.queue.insert(self.cells.as_mut_slice(), index, key);
    }

    /// Commit `index`'s staged distance and relax its neighbour subset
    /// against its nearest obstacle.
    fn lower(&mut self, index: usize) {
        let cell = &mut self.cells[index];
        if cell.dist != cell.dist_new {
            if let Some(log) = self.changes.as_mut() {
                log.record(index, cell.dist);
            }
            cell.dist = cell.dist_new;
            self.report.cells_lowered += 1;
            let (coords, dist) = (cell.coords, cell.dist);
            self.observer.on_lowered(coords, dist);
        }

        let cell = &self.cells[index];
        debug_assert!(cell.obs.is_some(), "queued cell {:?} has no obstacle", cell.coords);
        let Some(obs) = cell.obs else {
            return;
        };
        let dir = if self.config.direction_pruning {
            cell.dir
        } else {
            Direction::FULL
        };
        let target = self.cells[obs as usize].coords;

        for entry in self.neighbors.range(dir) {
            let n = index.wrapping_add_signed(self.neighbors.flat_offset(entry));
            let neighbour = &mut self.cells[n];
            if neighbour.is_border() {
                continue;
            }
            let d = squared_distance(neighbour.coords, target, self.dmax_sqrd);
            if d < neighbour.dist_new {
                neighbour.dist_new = d;
                neighbour.obs = Some(obs);
                neighbour.dir = self.neighbors.direction(entry);
                self.update_vertex(n);
            }
        }
    }

    /// Raise every neighbour of `index` whose obstacle is gone; collect the
    /// others as border seeds.
    fn waveout(&mut self, index: usize) {
        for entry in self.neighbors.range(Direction::FULL) {
            let n = index.wrapping_add_signed(self.neighbors.flat_offset(entry));
            let neighbour = &self.cells[n];
            if neighbour.is_border() {
                continue;
            }
            let Some(obs) = neighbour.obs else {
                continue;
            };
            if self.cells[obs as usize].is_obstacle() {
                self.border_seeds.push(n);
            } else {
                self.raise(n);
                self.report.cells_raised += 1;
                self.rem_stack.push(n);
            }
        }
    }

    /// Drain the removal stack, cascading through invalidated cells.
    pub(crate) fn propagate_removals(&mut self) {
        while let Some(index) = self.rem_stack.pop() {
            self.waveout(index);
        }
    }

    /// Queue every still-valid border seed at its current distance with the
    /// full neighbourhood.
    pub(crate) fn propagate_border(&mut self) {
        let seeds = std::mem::take(&mut self.border_seeds);
        for &index in &seeds {
            let valid = self.cells[index]
                .obs
                .is_some_and(|o| self.cells[o as usize].is_obstacle());
            if !valid {
                continue;
            }
            let cell = &mut self.cells[index];
            cell.dir = Direction::FULL;
            let key = cell.dist_new as u32;
            self.queue.insert(self.cells.as_mut_slice(), index, key);
        }
        self.border_seeds = seeds;
        self.border_seeds.clear();
    }

    /// Drain the queue to a fixed point.
    pub(crate) fn propagate(&mut self) {
        while let Some(index) = self.queue.pop(self.cells.as_mut_slice()) {
            self.report.queue_pops += 1;
            self.lower(index);
        }
    }
}
