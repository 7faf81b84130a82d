//! Detector errors.

use std::error::Error;
use std::fmt;

use siggen_core::{FieldError, GeometryError};

/// Errors from constructing, updating or solving a detector.
#[derive(Clone, Debug, PartialEq)]
pub enum DetectorError {
    /// A parameter failed validation. The detector is unchanged.
    InvalidGeometry(GeometryError),
    /// The field solve failed.
    Field(FieldError),
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry(e) => write!(f, "{e}"),
            Self::Field(e) => write!(f, "{e}"),
        }
    }
}

impl Error for DetectorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGeometry(e) => Some(e),
            Self::Field(e) => Some(e),
        }
    }
}

impl From<GeometryError> for DetectorError {
    fn from(e: GeometryError) -> Self {
        Self::InvalidGeometry(e)
    }
}

impl From<FieldError> for DetectorError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}
