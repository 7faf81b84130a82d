//! Shockley–Ramo signal synthesis.

use siggen_core::{Electrode, FieldError, FieldSampler};
use siggen_drift::{Trajectory, TrajectoryStatus};

use crate::error::PulseError;
use crate::response::PreampResponse;
use crate::timing::Timing;
use crate::waveform::Waveform;

/// Relative tolerance when matching a trajectory step to the calculation step.
const STEP_TOLERANCE: f64 = 1e-9;

/// Build the readout waveform induced by `trajectories`.
///
/// For each carrier the induced current at calculation step `k` is
/// `q·w(t_k)·(φ_k − φ_{k−1})`, where `φ` is the point-contact weighting
/// potential along the trajectory and `w` the trapping survival. Currents
/// of all carriers are summed, integrated to charge (so collected charge
/// holds to the end of the window), passed through `response` and
/// resampled to the output period.
///
/// A carrier that ends collected on an electrode contributes the exact
/// boundary weighting potential (1 on the point contact, 0 on the outer
/// contact) at its final sample. Samples past the window are discarded.
pub fn synthesize<S: FieldSampler + ?Sized>(
    trajectories: &[Trajectory],
    sampler: &S,
    timing: &Timing,
    response: &PreampResponse,
) -> Result<Waveform, PulseError> {
    timing
        .validate()
        .and_then(|()| response.validate())
        .map_err(|e| PulseError::InvalidTiming {
            reason: e.to_string(),
        })?;

    let dt = timing.step_time_calc;
    let mut current = vec![0.0; timing.time_steps_calc];
    for trajectory in trajectories {
        if (trajectory.dt - dt).abs() > STEP_TOLERANCE * dt {
            return Err(PulseError::TimestepMismatch {
                expected: dt,
                found: trajectory.dt,
            });
        }
        accumulate(trajectory, sampler, timing, &mut current)?;
    }

    let mut charge = current;
    let mut total = 0.0;
    for v in charge.iter_mut() {
        total += *v;
        *v = total;
    }
    response.apply(&mut charge, dt);

    let samples = timing
        .resampling
        .apply(&charge, dt, timing.step_time_out, timing.output_len());
    tracing::debug!(
        carriers = trajectories.len(),
        samples = samples.len(),
        collected = total,
        "synthesized waveform"
    );
    Ok(Waveform::new(samples, timing.step_time_out))
}

fn weighting_potential<S: FieldSampler + ?Sized>(
    sampler: &S,
    trajectory: &Trajectory,
    k: usize,
    previous: f64,
) -> Result<f64, PulseError> {
    if k + 1 == trajectory.points.len() {
        match trajectory.status {
            TrajectoryStatus::Collected(Electrode::PointContact) => return Ok(1.0),
            TrajectoryStatus::Collected(Electrode::OuterContact) => return Ok(0.0),
            _ => {}
        }
    }
    match sampler.sample(trajectory.points[k]) {
        Ok(s) => Ok(s.weighting_potential),
        Err(FieldError::OutOfBounds { .. }) => Ok(previous),
        Err(e) => Err(e.into()),
    }
}

fn accumulate<S: FieldSampler + ?Sized>(
    trajectory: &Trajectory,
    sampler: &S,
    timing: &Timing,
    current: &mut [f64],
) -> Result<(), PulseError> {
    if trajectory.points.len() < 2 {
        return Ok(());
    }
    let q = trajectory.charge();
    let mut previous = weighting_potential(sampler, trajectory, 0, 0.0)?;
    let last = trajectory.points.len().min(current.len());
    for k in 1..last {
        let phi = weighting_potential(sampler, trajectory, k, previous)?;
        current[k] += q * timing.survival(k as f64 * trajectory.dt) * (phi - previous);
        previous = phi;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use siggen_core::{CarrierKind, Geometry, Point, Vector};
    use siggen_test_utils::UniformField;

    fn field() -> UniformField {
        UniformField::new(Geometry::default(), Vector::new(0.0, 0.0, -10.0))
    }

    /// A straight path from z=`from` to z=`to` in `n` steps on the axis.
    fn path(carrier: CarrierKind, from: f64, to: f64, n: usize, status: TrajectoryStatus) -> Trajectory {
        let points = (0..=n)
            .map(|k| Point::new(0.0, 0.0, from + (to - from) * k as f64 / n as f64))
            .collect();
        Trajectory {
            carrier,
            weight: 1.0,
            dt: 1.0,
            points,
            status,
        }
    }

    fn short_timing() -> Timing {
        Timing {
            time_steps_calc: 100,
            step_time_out: 10.0,
            ..Timing::default()
        }
    }

    #[test]
    fn collected_pair_induces_full_charge() {
        let holes = path(
            CarrierKind::Hole,
            25.0,
            1.0,
            20,
            TrajectoryStatus::Collected(Electrode::PointContact),
        );
        let electrons = path(
            CarrierKind::Electron,
            25.0,
            50.0,
            30,
            TrajectoryStatus::Collected(Electrode::OuterContact),
        );
        let w = synthesize(
            &[holes, electrons],
            &field(),
            &short_timing(),
            &PreampResponse::ideal(),
        )
        .unwrap();
        assert_eq!(w.len(), 10);
        assert!((w.final_value() - 1.0).abs() < 1e-12);
        for s in w.samples.windows(2) {
            assert!(s[1] >= s[0] - 1e-12);
        }
    }

    #[test]
    fn trapping_reduces_amplitude() {
        let holes = path(
            CarrierKind::Hole,
            25.0,
            1.0,
            50,
            TrajectoryStatus::Collected(Electrode::PointContact),
        );
        let free = synthesize(
            std::slice::from_ref(&holes),
            &field(),
            &short_timing(),
            &PreampResponse::ideal(),
        )
        .unwrap();
        let trapped = synthesize(
            &[holes],
            &field(),
            &Timing {
                trap_constant: Some(50.0),
                ..short_timing()
            },
            &PreampResponse::ideal(),
        )
        .unwrap();
        assert!(trapped.final_value() < free.final_value());
    }

    #[test]
    fn output_length_independent_of_trajectories() {
        let t = short_timing();
        let empty = synthesize(&[], &field(), &t, &PreampResponse::default()).unwrap();
        assert_eq!(empty.len(), t.output_len());
        assert!(empty.samples.iter().all(|&v| v == 0.0));

        let long = path(CarrierKind::Hole, 40.0, 2.0, 500, TrajectoryStatus::TimedOut);
        let w = synthesize(&[long], &field(), &t, &PreampResponse::default()).unwrap();
        assert_eq!(w.len(), t.output_len());
    }

    #[test]
    fn mismatched_step_is_rejected() {
        let mut holes = path(CarrierKind::Hole, 25.0, 1.0, 5, TrajectoryStatus::TimedOut);
        holes.dt = 0.5;
        let err = synthesize(&[holes], &field(), &short_timing(), &PreampResponse::ideal())
            .unwrap_err();
        assert_eq!(
            err,
            PulseError::TimestepMismatch {
                expected: 1.0,
                found: 0.5
            }
        );
    }

    #[test]
    fn invalid_timing_is_rejected() {
        let t = Timing {
            step_time_out: 0.1,
            ..short_timing()
        };
        let err = synthesize(&[], &field(), &t, &PreampResponse::ideal()).unwrap_err();
        assert!(matches!(err, PulseError::InvalidTiming { .. }));
    }
}
