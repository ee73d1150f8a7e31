//! End-to-end scenarios on small unit-resolution grids.

use brushfire_core::{DVec3, DistanceMapConfig, IVec3};
use brushfire_engine::DistanceMap;
use brushfire_test_utils::fixtures::unit_config;

fn map(n: u32, max: f64) -> DistanceMap {
    DistanceMap::new(unit_config(n, max)).unwrap()
}

#[test]
fn single_obstacle_in_ten_cube() {
    let mut map = map(10, 5.0);
    map.add_points_to_map(&[DVec3::new(5.0, 5.0, 5.0)]);

    assert_eq!(map.cell_distance(IVec3::new(5, 5, 5)), 0.0);
    assert_eq!(map.cell_distance(IVec3::new(6, 5, 5)), 1.0);
    assert_eq!(map.cell_distance(IVec3::new(0, 0, 0)), 5.0);
    assert_eq!(map.metric_distance(DVec3::new(6.2, 5.9, 5.1)), 1.0);
    assert_eq!(map.distance(DVec3::new(6.2, 5.9, 5.1)), 1.0);
    map.check_invariants().unwrap();
}

#[test]
fn removal_falls_back_to_remaining_obstacle() {
    let mut map = map(10, 6.0);
    map.add_points_to_map(&[DVec3::splat(2.0), DVec3::splat(7.0)]);
    let probe = IVec3::splat(4);
    assert_eq!(map.squared_cell_distance(probe), Some(12));
    assert_eq!(map.nearest_obstacle(probe), Some(IVec3::splat(2)));

    map.remove_points_from_map(&[DVec3::splat(2.0)]);
    assert_eq!(map.squared_cell_distance(probe), Some(27));
    assert_eq!(map.cell_distance(probe), 27f64.sqrt());
    assert_eq!(map.nearest_obstacle(probe), Some(IVec3::splat(7)));
    map.check_invariants().unwrap();
}

#[test]
fn removal_beyond_range_reads_max() {
    let mut map = map(10, 5.0);
    map.add_points_to_map(&[DVec3::splat(2.0), DVec3::splat(7.0)]);
    map.remove_points_from_map(&[DVec3::splat(2.0)]);
    // sqrt(27) exceeds the 5 m clamp.
    assert_eq!(map.cell_distance(IVec3::splat(4)), 5.0);
    assert_eq!(map.nearest_obstacle(IVec3::splat(4)), None);
}

#[test]
fn moving_an_obstacle_with_update() {
    let mut map = map(12, 4.0);
    let mut at = DVec3::splat(3.5);
    map.add_points_to_map(&[at]);
    for step in 1..6 {
        let next = DVec3::new(3.5 + step as f64, 3.5, 3.5);
        let report = map.update_points_in_map(&[at], &[next]);
        assert_eq!(report.obstacles_added, 1);
        assert_eq!(report.obstacles_removed, 1);
        at = next;
        let cell = map.world_to_grid(at);
        assert_eq!(map.obstacle_cells().collect::<Vec<_>>(), vec![cell]);
        assert_eq!(map.squared_cell_distance(cell - IVec3::X), Some(1));
        assert_eq!(map.squared_cell_distance(cell - IVec3::new(3, 0, 0)), Some(9));
        map.check_invariants().unwrap();
    }
    // Far from the final position nothing is left behind.
    assert_eq!(map.squared_cell_distance(IVec3::splat(3)), Some(16));
}

#[test]
fn obstacle_wall_shadows_far_side() {
    let mut map = map(9, 4.0);
    let wall: Vec<DVec3> = (0..9)
        .flat_map(|y| (0..9).map(move |z| DVec3::new(4.5, y as f64 + 0.5, z as f64 + 0.5)))
        .collect();
    map.add_points_to_map(&wall);
    for x in 0..9 {
        let expected = (x - 4i32).pow(2).min(16);
        assert_eq!(map.squared_cell_distance(IVec3::new(x, 3, 7)), Some(expected));
    }

    // Punch a hole; cells in and behind it measure to the hole's rim.
    map.remove_points_from_map(&[DVec3::new(4.5, 4.5, 4.5)]);
    assert!(!map.is_obstacle(IVec3::splat(4)));
    assert_eq!(map.squared_cell_distance(IVec3::new(4, 4, 4)), Some(1));
    assert_eq!(map.squared_cell_distance(IVec3::new(5, 4, 4)), Some(2));
    assert_eq!(map.squared_cell_distance(IVec3::new(6, 4, 4)), Some(5));
    map.check_invariants().unwrap();
}

#[test]
fn offset_origin_and_fine_resolution() {
    let config = DistanceMapConfig::new(DVec3::new(-1.0, -1.0, 0.0), DVec3::new(2.0, 2.0, 1.0), 0.05, 0.2);
    let mut map = DistanceMap::new(config).unwrap();
    assert_eq!((map.num_cells_x(), map.num_cells_y(), map.num_cells_z()), (40, 40, 20));

    map.add_points_to_map(&[DVec3::new(0.0, 0.0, 0.5)]);
    let cell = map.world_to_grid(DVec3::new(0.0, 0.0, 0.5));
    assert_eq!(cell, IVec3::new(20, 20, 10));
    assert!(map.is_obstacle(cell));

    let d = map.metric_distance(map.grid_to_world(cell + IVec3::new(2, 0, 0)));
    assert!((d - 0.1).abs() < 1e-9, "{d}");
    assert_eq!(map.metric_distance(DVec3::new(0.9, 0.9, 0.9)), 0.2);
    // Outside the volume.
    assert_eq!(map.metric_distance(DVec3::new(5.0, 0.0, 0.5)), 0.2);
    map.check_invariants().unwrap();
}

#[test]
fn reset_then_reuse() {
    let mut map = map(8, 3.0);
    map.add_points_to_map(&[DVec3::splat(1.5), DVec3::splat(6.5)]);
    map.reset();
    assert_eq!(map.obstacle_cells().count(), 0);
    map.check_invariants().unwrap();

    let report = map.add_points_to_map(&[DVec3::splat(6.5)]);
    assert_eq!(report.obstacles_added, 1);
    assert_eq!(map.squared_cell_distance(IVec3::splat(1)), Some(9));
    assert_eq!(map.squared_cell_distance(IVec3::splat(5)), Some(3));
}
