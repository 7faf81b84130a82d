//! Fixed-step RK4 integration of carrier drift.

use siggen_core::{CarrierKind, FieldError, FieldSampler, Point, Vector};

use crate::config::{DriftConfig, IntegratorLimits};
use crate::error::DriftError;
use crate::mobility::MobilityModel;
use crate::trajectory::{Trajectory, TrajectoryStatus};

/// Integrates carrier trajectories through a sampled field.
///
/// Each step advances the carrier with classic fourth-order Runge–Kutta
/// on the drift velocity field. When an intermediate stage falls outside
/// the sampled extent (near the crystal surface) the step falls back to
/// a forward Euler step from the current position, which then terminates
/// the trajectory on the surface.
pub struct DriftIntegrator<'a, S: FieldSampler + ?Sized> {
    sampler: &'a S,
    mobility: &'a MobilityModel,
    limits: &'a IntegratorLimits,
}

impl<'a, S: FieldSampler + ?Sized> DriftIntegrator<'a, S> {
    /// Create an integrator over `sampler` using `config`.
    pub fn new(sampler: &'a S, config: &'a DriftConfig) -> Self {
        Self {
            sampler,
            mobility: &config.mobility,
            limits: &config.limits,
        }
    }

    fn velocity(&self, carrier: CarrierKind, p: Point) -> Result<Vector, FieldError> {
        let sample = self.sampler.sample(p)?;
        Ok(self.mobility.velocity(carrier, sample.efield))
    }

    /// One RK4 step. `Ok(None)` means the carrier is outside the grid at `p`.
    fn step(&self, carrier: CarrierKind, p: Point, dt: f64) -> Result<Option<Point>, DriftError> {
        let k1 = match self.velocity(carrier, p) {
            Ok(v) => v,
            Err(FieldError::OutOfBounds { .. }) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let euler = p + k1 * dt;
        let stages = || -> Result<Point, FieldError> {
            let k2 = self.velocity(carrier, p + k1 * (dt / 2.0))?;
            let k3 = self.velocity(carrier, p + k2 * (dt / 2.0))?;
            let k4 = self.velocity(carrier, p + k3 * dt)?;
            Ok(p + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0))
        };
        match stages() {
            Ok(next) => Ok(Some(next)),
            Err(FieldError::OutOfBounds { .. }) => Ok(Some(euler)),
            Err(e) => Err(e.into()),
        }
    }

    /// Drift a `carrier` starting at `start` with time step `dt` (ns).
    ///
    /// Anomalous terminations other than a stall are reported through
    /// [`Trajectory::status`]. A stall is an error carrying the partial
    /// trajectory.
    pub fn integrate(
        &self,
        start: Point,
        carrier: CarrierKind,
        dt: f64,
    ) -> Result<Trajectory, DriftError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(DriftError::InvalidTimeStep { dt });
        }
        let geometry = self.sampler.geometry();
        let mut trajectory = Trajectory {
            carrier,
            weight: 1.0,
            dt,
            points: vec![start],
            status: TrajectoryStatus::Escaped,
        };
        if !(start.is_finite() && geometry.in_active_volume(start.to_cyl())) {
            tracing::trace!(%carrier, %start, "carrier starts outside the active volume");
            return Ok(trajectory);
        }

        let mut p = start;
        let mut slow = 0usize;
        for step in 1..=self.limits.max_steps {
            let Some(next) = self.step(carrier, p, dt)? else {
                trajectory.status = TrajectoryStatus::Escaped;
                return Ok(trajectory);
            };
            if !next.is_finite() {
                trajectory.status = TrajectoryStatus::Escaped;
                return Ok(trajectory);
            }
            trajectory.points.push(next);

            let cyl = next.to_cyl();
            if !geometry.in_active_volume(cyl) {
                trajectory.status = match geometry.electrode_at(cyl) {
                    Some(electrode) => TrajectoryStatus::Collected(electrode),
                    None => TrajectoryStatus::Escaped,
                };
                tracing::trace!(%carrier, step, status = %trajectory.status, "carrier left active volume");
                return Ok(trajectory);
            }

            if next.distance(p) < self.limits.min_displacement {
                slow += 1;
                if slow >= self.limits.stall_steps {
                    trajectory.status = TrajectoryStatus::Stalled;
                    return Err(DriftError::Stalled {
                        carrier,
                        steps: step,
                        position: next,
                        trajectory: Box::new(trajectory),
                    });
                }
            } else {
                slow = 0;
            }
            p = next;
        }

        trajectory.status = TrajectoryStatus::TimedOut;
        Ok(trajectory)
    }
}
