//! Calculation and output time grids.

use siggen_core::GeometryError;

use crate::resample::Resampling;

/// Time discretization of a signal calculation.
///
/// Carriers are drifted with `step_time_calc` for at most
/// `time_steps_calc` samples; the result is reduced to one sample every
/// `step_time_out`.
#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    /// Calculation step (ns).
    pub step_time_calc: f64,
    /// Number of calculation samples in the signal window.
    pub time_steps_calc: usize,
    /// Output sampling period (ns). Not smaller than the calculation step.
    pub step_time_out: f64,
    /// Charge-trapping lifetime (ns). `None` disables trapping.
    pub trap_constant: Option<f64>,
    /// Reduction from calculation to output samples.
    pub resampling: Resampling,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            step_time_calc: 1.0,
            time_steps_calc: 5_000,
            step_time_out: 10.0,
            trap_constant: None,
            resampling: Resampling::default(),
        }
    }
}

impl Timing {
    /// Length of the signal window (ns).
    pub fn window(&self) -> f64 {
        self.time_steps_calc as f64 * self.step_time_calc
    }

    /// Number of output samples: `round(window / step_time_out)`.
    pub fn output_len(&self) -> usize {
        (self.window() / self.step_time_out).round() as usize
    }

    /// Fraction of charge still free after drifting for `t` ns.
    pub fn survival(&self, t: f64) -> f64 {
        match self.trap_constant {
            Some(tau) if tau > 0.0 => (-t / tau).exp(),
            _ => 1.0,
        }
    }

    /// Check steps are positive and consistent.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.step_time_calc.is_finite() && self.step_time_calc > 0.0) {
            return Err(GeometryError::new(
                "step_time_calc",
                format!("must be > 0, got {}", self.step_time_calc),
            ));
        }
        if self.time_steps_calc < 2 {
            return Err(GeometryError::new(
                "time_steps_calc",
                format!("must be >= 2, got {}", self.time_steps_calc),
            ));
        }
        if !(self.step_time_out.is_finite() && self.step_time_out >= self.step_time_calc) {
            return Err(GeometryError::new(
                "step_time_out",
                format!(
                    "must be >= step_time_calc ({}), got {}",
                    self.step_time_calc, self.step_time_out
                ),
            ));
        }
        if let Some(tau) = self.trap_constant {
            if !(tau.is_finite() && tau >= 0.0) {
                return Err(GeometryError::new(
                    "trap_constant",
                    format!("must be >= 0, got {tau}"),
                ));
            }
        }
        Ok(())
    }
}
