//! Charge-carrier transport for the siggen detector-signal simulator.
//!
//! Drift velocities come from a field-dependent [`MobilityModel`] with an
//! optional crystal-temperature correction. [`DriftIntegrator`] advances a
//! carrier through any [`FieldSampler`](siggen_core::FieldSampler) with a
//! fixed-step RK4 scheme and records a [`Trajectory`] until the carrier is
//! collected, escapes, stalls, or runs out of steps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod integrator;
pub mod mobility;
pub mod trajectory;

pub use config::{DriftConfig, IntegratorLimits};
pub use error::DriftError;
pub use integrator::DriftIntegrator;
pub use mobility::{MobilityModel, MobilityParams, REFERENCE_TEMPERATURE, TEMPERATURE_RANGE};
pub use trajectory::{Trajectory, TrajectoryStatus};
