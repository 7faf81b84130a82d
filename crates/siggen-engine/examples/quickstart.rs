//! Compute the signal of a single 1 MeV deposition in the default detector.
//!
//! Run with `RUST_LOG=debug` to see the solve and drift diagnostics.

use std::error::Error;

use siggen_core::InteractionSite;
use siggen_detector::{Detector, DetectorConfig, ParameterUpdate};
use siggen_engine::Siggen;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = DetectorConfig::from_named([("xtal_grid", 1.0), ("xtal_hv", 2500.0)])?;
    let detector = Detector::new(config)?;
    let engine = Siggen::default();

    let sites = [InteractionSite::new(10.0, 5.0, 30.0, 1000.0)];
    let result = engine.make_signal(&detector, &sites)?;
    let w = &result.waveform;
    println!(
        "{} samples at {} ns, final {:.1} keV, t10-90 {:.0} ns, {} warnings",
        w.len(),
        w.dt,
        w.final_value(),
        w.time_to_fraction(0.9).unwrap_or(0.0) - w.time_to_fraction(0.1).unwrap_or(0.0),
        result.warnings.len()
    );
    println!(
        "fetch {} us, drift {} us, synth {} us",
        result.metrics.fetch_us, result.metrics.drift_us, result.metrics.synth_us
    );

    detector.update_parameters(&ParameterUpdate::new().bias_voltage(3500.0))?;
    let faster = engine.make_signal(&detector, &sites)?;
    println!(
        "at 3500 V: t50 {:.0} ns (was {:.0} ns)",
        faster.waveform.time_to_fraction(0.5).unwrap_or(0.0),
        w.time_to_fraction(0.5).unwrap_or(0.0)
    );
    Ok(())
}
