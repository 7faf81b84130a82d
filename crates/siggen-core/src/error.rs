//! Error types shared across the siggen crates.
//!
//! Organized by subsystem: detector description ([`GeometryError`]) and
//! field solving/sampling ([`FieldError`]). Downstream crates wrap these
//! in their own enums and expose them through `source()`.

use std::error::Error;
use std::fmt;

/// A detector parameter failed validation.
///
/// Raised by geometry, impurity, solver and detector-configuration
/// validation. `parameter` is the canonical parameter name as used by
/// named-parameter import/export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeometryError {
    /// Name of the offending parameter.
    pub parameter: &'static str,
    /// Human-readable description of the violation.
    pub reason: String,
}

impl GeometryError {
    /// Construct an error for `parameter`.
    pub fn new(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self {
            parameter,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid parameter '{}': {}", self.parameter, self.reason)
    }
}

impl Error for GeometryError {}

/// Errors from solving or sampling a field grid.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// The relaxation did not reach the tolerance within the iteration cap.
    Convergence {
        /// Sweeps performed before giving up.
        iterations: u32,
        /// Largest per-node update in the final sweep.
        residual: f64,
        /// The tolerance that was not met.
        tolerance: f64,
    },
    /// A sample was requested outside the grid extent.
    OutOfBounds {
        /// Radial coordinate of the request (mm).
        r: f64,
        /// Axial coordinate of the request (mm).
        z: f64,
        /// Largest radius covered by the grid (mm).
        r_max: f64,
        /// Largest height covered by the grid (mm).
        z_max: f64,
    },
    /// A progress hook requested cancellation.
    Cancelled {
        /// Sweeps performed before cancellation.
        iterations: u32,
    },
    /// The grid could not be constructed for the given geometry.
    InvalidGrid {
        /// Human-readable description.
        reason: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Convergence {
                iterations,
                residual,
                tolerance,
            } => write!(
                f,
                "field solve did not converge after {iterations} iterations \
                 (residual {residual:.3e}, tolerance {tolerance:.3e})"
            ),
            Self::OutOfBounds { r, z, r_max, z_max } => write!(
                f,
                "point (r={r:.3}, z={z:.3}) outside grid extent [0, {r_max}] x [0, {z_max}]"
            ),
            Self::Cancelled { iterations } => {
                write!(f, "field solve cancelled after {iterations} iterations")
            }
            Self::InvalidGrid { reason } => write!(f, "invalid grid: {reason}"),
        }
    }
}

impl Error for FieldError {}
