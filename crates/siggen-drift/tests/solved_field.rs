//! Drift through a solved detector field.

use siggen_core::{CarrierKind, Electrode, Point};
use siggen_drift::{DriftConfig, DriftIntegrator, TrajectoryStatus};
use siggen_field::{FieldGrid, FieldModel, SolverSettings};

fn solved() -> FieldGrid {
    FieldModel {
        solver: SolverSettings::default().with_grid_spacing(1.0),
        ..FieldModel::default()
    }
    .solve()
    .unwrap()
}

#[test]
fn centre_site_carriers_reach_opposite_contacts() {
    let grid = solved();
    let cfg = DriftConfig::default();
    let integrator = DriftIntegrator::new(&grid, &cfg);
    let start = Point::new(0.0, 0.0, 25.0);

    let holes = integrator.integrate(start, CarrierKind::Hole, 1.0).unwrap();
    assert_eq!(
        holes.status,
        TrajectoryStatus::Collected(Electrode::PointContact)
    );
    assert!(holes.len() <= cfg.limits.max_steps + 1);

    let electrons = integrator
        .integrate(start, CarrierKind::Electron, 1.0)
        .unwrap();
    assert_eq!(
        electrons.status,
        TrajectoryStatus::Collected(Electrode::OuterContact)
    );
}

#[test]
fn integration_is_deterministic() {
    let grid = solved();
    let cfg = DriftConfig::default();
    let integrator = DriftIntegrator::new(&grid, &cfg);
    let start = Point::new(12.0, 3.0, 30.0);
    let a = integrator.integrate(start, CarrierKind::Hole, 1.0).unwrap();
    let b = integrator.integrate(start, CarrierKind::Hole, 1.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn trajectories_stay_bounded() {
    let grid = solved();
    let mut cfg = DriftConfig::default();
    cfg.limits.max_steps = 200;
    let integrator = DriftIntegrator::new(&grid, &cfg);
    for (x, z) in [(3.0, 5.0), (20.0, 10.0), (28.0, 48.0), (1.0, 2.0)] {
        for carrier in CarrierKind::ALL {
            if let Ok(t) = integrator.integrate(Point::new(x, 0.0, z), carrier, 1.0) {
                assert!(t.len() <= 201);
            }
        }
    }
}
