//! Errors that abort a signal calculation.
//!
//! Only structural failures appear here. Carriers that escape, time out
//! or stall are recovered into [`CarrierWarning`](crate::CarrierWarning)s
//! on an otherwise successful result.

use std::error::Error;
use std::fmt;

use siggen_core::{FieldError, GeometryError};
use siggen_detector::DetectorError;
use siggen_drift::DriftError;
use siggen_pulse::PulseError;

/// Error from `make_signal` and the batched sweep.
#[derive(Clone, Debug, PartialEq)]
pub enum SiggenError {
    /// A detector or engine parameter failed validation.
    InvalidGeometry(GeometryError),
    /// The field grid could not be solved or sampled.
    Field(FieldError),
    /// An interaction site is unusable.
    InvalidSite {
        /// Index of the site in the event (0-based).
        index: usize,
        /// Human-readable description.
        reason: String,
    },
    /// The event has no interaction sites.
    NoSites,
    /// Waveform synthesis failed.
    Pulse(PulseError),
    /// Drift integration failed for a reason other than a stall.
    Drift(DriftError),
    /// A sweep worker panicked or disconnected before reporting.
    WorkerFailed {
        /// Human-readable description.
        reason: String,
    },
}

impl fmt::Display for SiggenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry(e) => write!(f, "{e}"),
            Self::Field(e) => write!(f, "{e}"),
            Self::InvalidSite { index, reason } => write!(f, "site {index}: {reason}"),
            Self::NoSites => write!(f, "event has no interaction sites"),
            Self::Pulse(e) => write!(f, "pulse synthesis failed: {e}"),
            Self::Drift(e) => write!(f, "drift failed: {e}"),
            Self::WorkerFailed { reason } => write!(f, "sweep worker failed: {reason}"),
        }
    }
}

impl Error for SiggenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGeometry(e) => Some(e),
            Self::Field(e) => Some(e),
            Self::Pulse(e) => Some(e),
            Self::Drift(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for SiggenError {
    fn from(e: GeometryError) -> Self {
        Self::InvalidGeometry(e)
    }
}

impl From<FieldError> for SiggenError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

impl From<DetectorError> for SiggenError {
    fn from(e: DetectorError) -> Self {
        match e {
            DetectorError::InvalidGeometry(e) => Self::InvalidGeometry(e),
            DetectorError::Field(e) => Self::Field(e),
        }
    }
}

impl From<PulseError> for SiggenError {
    fn from(e: PulseError) -> Self {
        match e {
            PulseError::Field(e) => Self::Field(e),
            other => Self::Pulse(other),
        }
    }
}

impl From<DriftError> for SiggenError {
    fn from(e: DriftError) -> Self {
        match e {
            DriftError::Field(e) => Self::Field(e),
            other => Self::Drift(other),
        }
    }
}
