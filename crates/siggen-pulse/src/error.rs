//! Pulse synthesis errors.

use std::error::Error;
use std::fmt;

use siggen_core::FieldError;

/// Errors from synthesizing a waveform.
#[derive(Clone, Debug, PartialEq)]
pub enum PulseError {
    /// The timing or response settings are unusable.
    InvalidTiming {
        /// Human-readable description.
        reason: String,
    },
    /// A trajectory was integrated with a different step than the
    /// calculation step.
    TimestepMismatch {
        /// Calculation step (ns).
        expected: f64,
        /// The trajectory's step (ns).
        found: f64,
    },
    /// The weighting potential could not be sampled.
    Field(FieldError),
}

impl fmt::Display for PulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTiming { reason } => write!(f, "invalid timing: {reason}"),
            Self::TimestepMismatch { expected, found } => write!(
                f,
                "trajectory step {found} ns does not match calculation step {expected} ns"
            ),
            Self::Field(e) => write!(f, "weighting potential unavailable: {e}"),
        }
    }
}

impl Error for PulseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for PulseError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}
