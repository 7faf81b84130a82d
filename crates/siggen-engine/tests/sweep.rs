//! Batched sweeps and concurrent callers.

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use siggen_core::{InteractionSite, SiteList};
use siggen_detector::{Detector, ParameterUpdate};
use siggen_engine::{Siggen, SiggenError};
use siggen_test_utils::small_config;

fn events() -> Vec<SiteList> {
    (0..12)
        .map(|k| {
            let k = k as f64;
            let mut sites = SiteList::new();
            sites.push(InteractionSite::new(1.0 + 0.5 * k, 0.3 * k, 2.0 + 0.5 * k, 100.0 + k));
            sites
        })
        .collect()
}

#[test]
fn sweep_matches_serial_calls_in_order() {
    let d = Detector::new(small_config()).unwrap();
    let engine = Siggen::default();
    let events = events();

    let batched = engine.make_signals(&d, &events, 3).unwrap();
    assert_eq!(batched.len(), events.len());
    for (event, result) in events.iter().zip(&batched) {
        let serial = engine.make_signal(&d, event).unwrap();
        let result = result.as_ref().unwrap();
        assert_eq!(result.waveform, serial.waveform);
        assert_eq!(result.warnings, serial.warnings);
    }
}

#[test]
fn sweep_uses_one_parameter_version() {
    let d = Detector::new(small_config()).unwrap();
    d.update_parameters(&ParameterUpdate::new().temperature(85.0))
        .unwrap();
    let out = Siggen::default().make_signals(&d, &events(), 4).unwrap();
    for r in &out {
        assert_eq!(r.as_ref().unwrap().parameter_version, d.version());
    }
}

#[test]
fn sweep_surfaces_solve_failure() {
    let d = Detector::new(small_config()).unwrap();
    d.update_parameters(&ParameterUpdate::new().set("max_iterations", 2.0))
        .unwrap();
    let err = Siggen::default().make_signals(&d, &events(), 2).unwrap_err();
    assert!(matches!(err, SiggenError::Field(_)), "got {err}");
}

#[test]
fn concurrent_callers_agree() {
    let d = Arc::new(Detector::new(small_config()).unwrap());
    let engine = Arc::new(Siggen::default());
    let site = [InteractionSite::new(3.0, 1.0, 4.0, 500.0)];
    let expected = engine.make_signal(&d, &site).unwrap().waveform;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let d = Arc::clone(&d);
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.make_signal(&d, &site).unwrap().waveform)
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn worker_count_does_not_change_results(workers in 1usize..6) {
        let d = Detector::new(small_config()).unwrap();
        let engine = Siggen::default();
        let events = events();
        let one = engine.make_signals(&d, &events, 1).unwrap();
        let many = engine.make_signals(&d, &events, workers).unwrap();
        for (a, b) in one.iter().zip(&many) {
            prop_assert_eq!(&a.as_ref().unwrap().waveform, &b.as_ref().unwrap().waveform);
        }
    }
}
