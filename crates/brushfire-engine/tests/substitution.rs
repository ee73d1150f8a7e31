//! Implementations are interchangeable behind `dyn DistanceField`.

use brushfire_core::{DVec3, DistanceField, IVec3};
use brushfire_engine::DistanceMap;
use brushfire_test_utils::fixtures::{first_mismatch, random_points, unit_config};
use brushfire_test_utils::{RecordingObserver, ReferenceDistanceMap};

fn fields() -> Vec<Box<dyn DistanceField>> {
    let config = unit_config(9, 3.0);
    vec![
        Box::new(DistanceMap::new(config.clone()).unwrap()),
        Box::new(DistanceMap::with_observer(config.clone(), RecordingObserver::new()).unwrap()),
        Box::new(ReferenceDistanceMap::new(config).unwrap()),
    ]
}

#[test]
fn boxed_fields_agree() {
    let mut fields = fields();
    let config = unit_config(9, 3.0);
    let first = random_points(&config, 12, 1);
    let second = random_points(&config, 12, 2);

    for field in fields.iter_mut() {
        field.add_points_to_map(&first);
        field.update_points_in_map(&first[..6], &second);
        field.remove_points_from_map(&second[..3]);
    }
    for pair in fields.windows(2) {
        assert_eq!(first_mismatch(pair[0].as_ref(), pair[1].as_ref()), None);
    }
}

#[test]
fn introspection_is_uniform() {
    for field in fields() {
        assert_eq!(
            (field.num_cells_x(), field.num_cells_y(), field.num_cells_z()),
            (9, 9, 9)
        );
        assert_eq!(field.resolution(), 1.0);
        assert_eq!(field.origin(), DVec3::ZERO);
        assert_eq!(field.size(), DVec3::splat(9.0));
        assert_eq!(field.uninitialized_distance(), 3.0);
        assert!(field.is_cell_valid(IVec3::new(8, 8, 8)));
        assert!(!field.is_cell_valid(IVec3::new(9, 0, 0)));
        assert_eq!(field.world_to_grid(DVec3::new(2.7, 0.1, 8.9)), IVec3::new(2, 0, 8));
        assert_eq!(field.grid_to_world(IVec3::new(2, 0, 8)), DVec3::new(2.5, 0.5, 8.5));
        assert_eq!(field.cell_distance(IVec3::new(-1, 0, 0)), 3.0);
    }
}

#[test]
fn reset_through_trait_object() {
    for mut field in fields() {
        field.add_points_to_map(&[DVec3::splat(4.5)]);
        assert_eq!(field.metric_distance(DVec3::new(5.5, 4.5, 4.5)), 1.0);
        field.reset();
        assert_eq!(field.metric_distance(DVec3::new(5.5, 4.5, 4.5)), 3.0);
    }
}

#[test]
fn downcast_to_concrete_type() {
    let mut fields = fields();
    assert!(fields[0].downcast_ref::<DistanceMap>().is_some());
    assert!(fields[0].downcast_ref::<ReferenceDistanceMap>().is_none());
    assert!(fields[1]
        .downcast_ref::<DistanceMap<RecordingObserver>>()
        .is_some());
    assert!(fields[2].downcast_ref::<ReferenceDistanceMap>().is_some());

    fields[1].add_points_to_map(&[DVec3::splat(1.5)]);
    let map = fields[1]
        .downcast_mut::<DistanceMap<RecordingObserver>>()
        .unwrap();
    assert_eq!(map.observer().batches.len(), 1);
    map.observer_mut().clear();
    assert!(map.observer().batches.is_empty());
}
