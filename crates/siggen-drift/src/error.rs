//! Drift integration errors.

use std::error::Error;
use std::fmt;

use siggen_core::{CarrierKind, FieldError, Point};

use crate::trajectory::Trajectory;

/// Errors from integrating a carrier trajectory.
#[derive(Clone, Debug, PartialEq)]
pub enum DriftError {
    /// The carrier moved less than the minimum displacement for too many
    /// consecutive steps. Carries the partial trajectory.
    Stalled {
        /// The drifting species.
        carrier: CarrierKind,
        /// Steps taken before stalling.
        steps: usize,
        /// Where the carrier stopped.
        position: Point,
        /// Trajectory up to the stall, with status `Stalled`.
        trajectory: Box<Trajectory>,
    },
    /// The time step is not a positive finite number.
    InvalidTimeStep {
        /// The rejected step (ns).
        dt: f64,
    },
    /// The field could not be sampled for a reason other than leaving the grid.
    Field(FieldError),
}

impl fmt::Display for DriftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stalled {
                carrier,
                steps,
                position,
                ..
            } => write!(f, "{carrier} stalled at {position} after {steps} steps"),
            Self::InvalidTimeStep { dt } => write!(f, "invalid drift time step {dt} ns"),
            Self::Field(e) => write!(f, "field sampling failed: {e}"),
        }
    }
}

impl Error for DriftError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for DriftError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}
