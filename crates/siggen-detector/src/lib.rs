//! Detector description and field-grid caching for siggen.
//!
//! A [`Detector`] owns a validated [`DetectorConfig`] and lazily solves
//! and caches its field grid. Parameters can be changed at runtime with a
//! [`ParameterUpdate`]; only changes that affect the electrostatic
//! solution invalidate the cached grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod detector;
pub mod error;

pub use config::{parameter, DetectorConfig, ParameterScope, ParameterUpdate, PARAMETERS};
pub use detector::{Detector, DetectorView};
pub use error::DetectorError;
