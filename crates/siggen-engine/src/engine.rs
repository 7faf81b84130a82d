//! The signal generator.
//!
//! [`Siggen::make_signal`] takes a snapshot of a detector, drifts a hole
//! and an electron from every (sub-)cloud of every site, and synthesizes
//! the summed Shockley–Ramo signal. The detector's read lock is only held
//! while taking the snapshot, so concurrent calls on one detector never
//! wait on each other once its grid is cached.

use std::time::Instant;

use siggen_core::{CarrierKind, FieldSampler, GeometryError, InteractionSite, Point};
use siggen_detector::{Detector, DetectorView};
use siggen_drift::{DriftConfig, DriftError, DriftIntegrator, Trajectory};
use siggen_pulse::synthesize;

use crate::cloud::ChargeCloudModel;
use crate::error::SiggenError;
use crate::metrics::{micros, SignalMetrics};
use crate::result::{CarrierWarning, SignalResult, WarningKind};

// ── Configuration ───────────────────────────────────────────────

/// Engine settings that are independent of any detector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiggenConfig {
    /// Seed for charge-cloud subdivision.
    pub seed: u64,
    /// How site charge is represented while drifting.
    pub cloud: ChargeCloudModel,
}

impl SiggenConfig {
    /// Check the settings are usable.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.cloud.validate()
    }
}

// ── Engine ──────────────────────────────────────────────────────

/// Computes detector signals for interaction events.
///
/// `Siggen` holds no per-detector state; one instance can serve any number
/// of detectors from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Siggen {
    config: SiggenConfig,
}

impl Siggen {
    /// Create an engine with validated `config`.
    pub fn new(config: SiggenConfig) -> Result<Self, SiggenError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine settings.
    pub fn config(&self) -> &SiggenConfig {
        &self.config
    }

    /// Compute the signal of one event on `detector`.
    ///
    /// Solves the detector's field grid first if it is not cached.
    /// Configuration and solve failures abort the call; carriers that
    /// escape, time out or stall are reported as warnings on the result.
    pub fn make_signal(
        &self,
        detector: &Detector,
        sites: &[InteractionSite],
    ) -> Result<SignalResult, SiggenError> {
        let start = Instant::now();
        check_sites(sites)?;
        let view = detector.view()?;
        let fetch_us = micros(start.elapsed());

        let mut result = self.make_signal_with_view(&view, sites)?;
        result.metrics.fetch_us = fetch_us;
        result.metrics.total_us = micros(start.elapsed());
        Ok(result)
    }

    /// Compute the signal of one event against a detector snapshot.
    ///
    /// Useful when many events must see the same parameter version even
    /// if the detector is updated meanwhile.
    pub fn make_signal_with_view(
        &self,
        view: &DetectorView,
        sites: &[InteractionSite],
    ) -> Result<SignalResult, SiggenError> {
        let start = Instant::now();
        check_sites(sites)?;

        let config = &view.config;
        let mut drift = config.drift.clone();
        drift.limits.max_steps = config.timing.time_steps_calc.saturating_sub(1);
        let dt = config.timing.step_time_calc;

        let mut metrics = SignalMetrics::default();
        let mut warnings = Vec::new();
        let mut trajectories = Vec::new();

        let drift_start = Instant::now();
        for (index, site) in sites.iter().enumerate() {
            for (position, energy) in self.config.cloud.split(site, self.config.seed) {
                for carrier in CarrierKind::ALL {
                    let trajectory =
                        drift_carrier(view.grid.as_ref(), &drift, position, carrier, dt)?
                            .with_weight(energy);
                    if let Some(kind) = WarningKind::from_status(trajectory.status) {
                        let warning = CarrierWarning {
                            site_index: index,
                            carrier,
                            kind,
                            trajectory_len: trajectory.len(),
                            final_position: trajectory.final_position().unwrap_or(position),
                        };
                        tracing::warn!(detector = %view.id, "{warning}");
                        warnings.push(warning);
                    } else {
                        metrics.collected += 1;
                    }
                    metrics.carriers += 1;
                    metrics.trajectory_points += trajectory.len();
                    trajectories.push(trajectory);
                }
            }
        }
        metrics.drift_us = micros(drift_start.elapsed());

        let synth_start = Instant::now();
        let waveform = synthesize(
            &trajectories,
            view.grid.as_ref(),
            &config.timing,
            &config.response,
        )?;
        metrics.synth_us = micros(synth_start.elapsed());
        metrics.total_us = micros(start.elapsed());

        tracing::debug!(
            detector = %view.id,
            version = %view.version,
            sites = sites.len(),
            carriers = metrics.carriers,
            warnings = warnings.len(),
            total_us = metrics.total_us,
            "signal computed"
        );

        Ok(SignalResult {
            waveform,
            warnings,
            metrics,
            parameter_version: view.version,
            detector: view.id,
        })
    }
}

fn check_sites(sites: &[InteractionSite]) -> Result<(), SiggenError> {
    if sites.is_empty() {
        return Err(SiggenError::NoSites);
    }
    for (index, site) in sites.iter().enumerate() {
        site.validate()
            .map_err(|reason| SiggenError::InvalidSite { index, reason })?;
    }
    Ok(())
}

/// Drift one carrier, turning a stall into its partial trajectory.
fn drift_carrier<S: FieldSampler + ?Sized>(
    sampler: &S,
    config: &DriftConfig,
    start: Point,
    carrier: CarrierKind,
    dt: f64,
) -> Result<Trajectory, SiggenError> {
    match DriftIntegrator::new(sampler, config).integrate(start, carrier, dt) {
        Ok(trajectory) => Ok(trajectory),
        Err(DriftError::Stalled { trajectory, .. }) => Ok(*trajectory),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siggen_core::{Geometry, Vector};
    use siggen_test_utils::UniformField;

    #[test]
    fn empty_event_is_rejected() {
        let engine = Siggen::default();
        let d = Detector::new(siggen_test_utils::small_config()).unwrap();
        assert_eq!(engine.make_signal(&d, &[]).unwrap_err(), SiggenError::NoSites);
        assert!(!d.is_solved());
    }

    #[test]
    fn invalid_site_is_rejected_before_solving() {
        let engine = Siggen::default();
        let d = Detector::new(siggen_test_utils::small_config()).unwrap();
        let sites = [
            InteractionSite::new(1.0, 0.0, 5.0, 100.0),
            InteractionSite::new(1.0, 0.0, 5.0, -1.0),
        ];
        match engine.make_signal(&d, &sites).unwrap_err() {
            SiggenError::InvalidSite { index, .. } => assert_eq!(index, 1),
            other => panic!("expected InvalidSite, got {other}"),
        }
        assert!(!d.is_solved());
    }

    #[test]
    fn invalid_cloud_model_is_rejected() {
        let config = SiggenConfig {
            cloud: ChargeCloudModel::Gaussian { subclouds: 0 },
            ..SiggenConfig::default()
        };
        assert!(matches!(
            Siggen::new(config),
            Err(SiggenError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn stall_returns_partial_trajectory() {
        let field = UniformField::new(Geometry::default(), Vector::default());
        let t = drift_carrier(
            &field,
            &DriftConfig::default(),
            Point::new(5.0, 0.0, 20.0),
            CarrierKind::Hole,
            1.0,
        )
        .unwrap();
        assert_eq!(WarningKind::from_status(t.status), Some(WarningKind::Stalled));
        assert!(t.len() > 1);
    }

    #[test]
    fn invalid_step_is_an_error() {
        let field = UniformField::new(Geometry::default(), Vector::new(0.0, 0.0, -10.0));
        let err = drift_carrier(
            &field,
            &DriftConfig::default(),
            Point::new(5.0, 0.0, 20.0),
            CarrierKind::Hole,
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, SiggenError::Drift(DriftError::InvalidTimeStep { .. })));
    }
}
