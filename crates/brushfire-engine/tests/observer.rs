//! Propagation callbacks and change reports.

use brushfire_core::{DVec3, IVec3};
use brushfire_engine::DistanceMap;
use brushfire_test_utils::fixtures::{cell_centres, random_cells, unit_config};
use brushfire_test_utils::RecordingObserver;

fn observed(n: u32, max: f64, track: bool) -> DistanceMap<RecordingObserver> {
    let config = unit_config(n, max).with_change_tracking(track);
    DistanceMap::with_observer(config, RecordingObserver::new()).unwrap()
}

#[test]
fn callbacks_match_report_counters() {
    let mut map = observed(8, 3.0, false);
    let pts = cell_centres(&map, &random_cells(IVec3::splat(8), 6, 42));
    let added = map.add_points_to_map(&pts);
    assert_eq!(map.observer().lowered.len(), added.cells_lowered);
    assert!(map.observer().raised.is_empty());

    map.observer_mut().clear();
    let removed = map.remove_points_from_map(&pts[..3]);
    let obs = map.observer();
    assert_eq!(obs.lowered.len(), removed.cells_lowered);
    // Removed obstacles are raised too, but only the cascade is counted.
    assert_eq!(obs.raised.len(), removed.cells_raised + removed.obstacles_removed);
    assert_eq!(obs.batches, vec![removed]);
}

#[test]
fn change_list_matches_before_and_after() {
    let mut map = observed(8, 3.0, true);
    map.add_points_to_map(&[DVec3::splat(2.5), DVec3::splat(5.5)]);
    let before: Vec<_> = (0..512)
        .map(|i| IVec3::new(i % 8, (i / 8) % 8, i / 64))
        .map(|c| (c, map.squared_cell_distance(c).unwrap()))
        .collect();

    let report = map.update_points_in_map(&[DVec3::splat(2.5)], &[DVec3::new(6.5, 1.5, 1.5)]);
    let mut expected = Vec::new();
    for &(c, old) in &before {
        let new = map.squared_cell_distance(c).unwrap();
        if new != old {
            expected.push((c, old, new));
        }
    }
    let mut got: Vec<_> = report
        .changed
        .iter()
        .map(|ch| (ch.cell, ch.old_sqrd, ch.new_sqrd))
        .collect();
    got.sort_by_key(|&(c, _, _)| (c.z, c.y, c.x));
    assert_eq!(got, expected);
    assert!(!got.is_empty());
}

#[test]
fn untracked_reports_stay_empty() {
    let mut map = observed(6, 2.0, false);
    let report = map.add_points_to_map(&[DVec3::splat(3.5)]);
    assert!(report.changed.is_empty());
    assert!(report.cells_lowered > 0);
    assert!(report.queue_pops >= report.cells_lowered);
}

#[test]
fn observer_survives_the_map() {
    let mut map = observed(5, 2.0, false);
    map.add_points_to_map(&[DVec3::splat(2.5)]);
    map.reset();
    let observer = map.into_observer();
    assert_eq!(observer.batches.len(), 1);
    assert_eq!(observer.lowered[0], (IVec3::splat(2), 0));
}
