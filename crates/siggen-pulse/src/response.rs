//! Charge-sensitive preamplifier response.
//!
//! The rise is a single-pole low-pass with time constant `rise_tau`; an
//! optional `decay_tau` adds the feedback-discharge high-pass, giving the
//! usual double-exponential pulse. Both are applied as recursive
//! exponential-kernel filters on the calculation grid.

use siggen_core::GeometryError;

/// Preamplifier rise and decay time constants (ns).
#[derive(Clone, Debug, PartialEq)]
pub struct PreampResponse {
    /// Integration (rise) time constant. 0 passes the charge through.
    pub rise_tau: f64,
    /// Discharge time constant. `None` keeps the charge on the plateau.
    pub decay_tau: Option<f64>,
}

impl Default for PreampResponse {
    fn default() -> Self {
        Self {
            rise_tau: 20.0,
            decay_tau: None,
        }
    }
}

impl PreampResponse {
    /// A response that leaves the charge signal unchanged.
    pub fn ideal() -> Self {
        Self {
            rise_tau: 0.0,
            decay_tau: None,
        }
    }

    /// Check time constants are non-negative and finite.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.rise_tau.is_finite() && self.rise_tau >= 0.0) {
            return Err(GeometryError::new(
                "preamp_tau",
                format!("must be >= 0, got {}", self.rise_tau),
            ));
        }
        if let Some(tau) = self.decay_tau {
            if !(tau.is_finite() && tau > 0.0) {
                return Err(GeometryError::new(
                    "decay_tau",
                    format!("must be > 0, got {tau}"),
                ));
            }
        }
        Ok(())
    }

    /// Filter `signal`, sampled every `dt` ns, in place.
    pub fn apply(&self, signal: &mut [f64], dt: f64) {
        if self.rise_tau > 0.0 {
            let a = (-dt / self.rise_tau).exp();
            let mut y = 0.0;
            for v in signal.iter_mut() {
                y = a * y + (1.0 - a) * *v;
                *v = y;
            }
        }
        if let Some(tau) = self.decay_tau {
            let b = (-dt / tau).exp();
            let mut z = 0.0;
            let mut prev = 0.0;
            for v in signal.iter_mut() {
                z = b * (z + *v - prev);
                prev = *v;
                *v = z;
            }
        }
    }
}
