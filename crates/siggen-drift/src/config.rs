//! Drift configuration.

use siggen_core::GeometryError;

use crate::mobility::MobilityModel;

/// Termination limits for a single trajectory.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegratorLimits {
    /// Largest number of steps; a trajectory has at most `max_steps + 1` points.
    pub max_steps: usize,
    /// Consecutive slow steps that count as a stall.
    pub stall_steps: usize,
    /// Displacement per step (mm) below which a step counts as slow.
    pub min_displacement: f64,
}

impl Default for IntegratorLimits {
    fn default() -> Self {
        Self {
            max_steps: 4_999,
            stall_steps: 50,
            min_displacement: 1e-5,
        }
    }
}

/// Mobility and limits for drifting carriers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriftConfig {
    /// Carrier mobility.
    pub mobility: MobilityModel,
    /// Termination limits.
    pub limits: IntegratorLimits,
}

impl DriftConfig {
    /// Validate mobility parameters and limits.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.mobility.validate()?;
        if self.limits.max_steps == 0 {
            return Err(GeometryError::new("max_steps", "must be >= 1"));
        }
        if self.limits.stall_steps == 0 {
            return Err(GeometryError::new("stall_steps", "must be >= 1"));
        }
        let d = self.limits.min_displacement;
        if !(d.is_finite() && d >= 0.0) {
            return Err(GeometryError::new(
                "min_displacement",
                format!("must be >= 0, got {d}"),
            ));
        }
        Ok(())
    }
}
