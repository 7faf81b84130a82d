//! Core types and traits for the siggen detector-signal simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by the field solver, the drift
//! integrator, the pulse synthesizer and the engine: points, carriers,
//! interaction sites, the crystal geometry, error types, and the
//! [`FieldSampler`] trait through which all field lookups flow.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod carrier;
pub mod error;
pub mod geometry;
pub mod id;
pub mod point;
pub mod site;
pub mod traits;

pub use carrier::CarrierKind;
pub use error::{FieldError, GeometryError};
pub use geometry::{Electrode, Geometry};
pub use id::{DetectorInstanceId, ParameterVersion};
pub use point::{CylPoint, Point, Vector};
pub use site::{InteractionSite, SiteList};
pub use traits::{FieldSample, FieldSampler};
