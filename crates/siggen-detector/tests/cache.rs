//! Grid caching, invalidation and concurrent access.

use std::sync::Arc;
use std::thread;

use siggen_core::{FieldSampler, ParameterVersion, Point};
use siggen_detector::{Detector, DetectorConfig, DetectorError, ParameterUpdate};
use siggen_field::SolverSettings;

fn coarse() -> DetectorConfig {
    let mut c = DetectorConfig::default();
    c.field.solver = SolverSettings::default().with_grid_spacing(1.0);
    c
}

#[test]
fn bias_change_invalidates_grid() {
    let d = Detector::new(coarse()).unwrap();
    let before = d.field_grid().unwrap();
    let v = d
        .update_parameters(&ParameterUpdate::new().bias_voltage(3000.0))
        .unwrap();
    assert_eq!(v, ParameterVersion(1));
    assert!(!d.is_solved());

    let after = d.field_grid().unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.version(), ParameterVersion(1));

    let p = Point::new(10.0, 0.0, 25.0);
    let e_before = before.sample(p).unwrap().efield.norm();
    let e_after = after.sample(p).unwrap().efield.norm();
    assert!(e_after > e_before);
}

#[test]
fn signal_change_keeps_grid() {
    let d = Detector::new(coarse()).unwrap();
    let before = d.field_grid().unwrap();
    d.update_parameters(&ParameterUpdate::new().temperature(90.0).preamp_tau(40.0))
        .unwrap();
    assert!(d.is_solved());
    let view = d.view().unwrap();
    assert!(Arc::ptr_eq(&before, &view.grid));
    assert_eq!(view.version, ParameterVersion(1));
    assert_eq!(view.config.response.rise_tau, 40.0);
}

#[test]
fn invalid_update_leaves_state() {
    let d = Detector::new(coarse()).unwrap();
    let grid = d.field_grid().unwrap();
    let err = d
        .update_parameters(&ParameterUpdate::new().bias_voltage(3000.0).set("pc_radius", 100.0))
        .unwrap_err();
    match err {
        DetectorError::InvalidGeometry(e) => assert_eq!(e.parameter, "pc_radius"),
        other => panic!("expected InvalidGeometry, got {other:?}"),
    }
    assert_eq!(d.version(), ParameterVersion(0));
    assert_eq!(d.config().field.bias_voltage, 2000.0);
    assert!(Arc::ptr_eq(&grid, &d.field_grid().unwrap()));
}

#[test]
fn readers_share_one_grid() {
    let d = Detector::new(coarse()).unwrap();
    let grids: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| d.field_grid().unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for g in &grids[1..] {
        assert!(Arc::ptr_eq(&grids[0], g));
    }
}

#[test]
fn held_grid_survives_update() {
    let d = Detector::new(coarse()).unwrap();
    let held = d.field_grid().unwrap();
    thread::scope(|s| {
        s.spawn(|| {
            d.update_parameters(&ParameterUpdate::new().bias_voltage(2500.0))
                .unwrap();
        });
    });
    assert_eq!(held.bias_voltage(), 2000.0);
    assert_eq!(d.field_grid().unwrap().bias_voltage(), 2500.0);
}
