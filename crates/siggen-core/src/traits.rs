//! The field-sampling seam between the solver and the drift integrator.

use crate::error::FieldError;
use crate::geometry::Geometry;
use crate::point::{Point, Vector};

/// Electric field and weighting potential at a single point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldSample {
    /// Electric field in Cartesian components (V/mm).
    pub efield: Vector,
    /// Weighting potential of the point contact (dimensionless, 0..=1).
    pub weighting_potential: f64,
}

/// Read-only access to a solved detector field.
///
/// Implemented by the solved grid and by test mocks. The drift integrator
/// and pulse synthesizer only see fields through this trait.
///
/// # Contract
///
/// `sample` must be pure: repeated calls with the same point return the
/// same value. Points outside the sampled extent return
/// [`FieldError::OutOfBounds`].
pub trait FieldSampler: Send + Sync {
    /// The detector geometry the field was computed for.
    fn geometry(&self) -> &Geometry;

    /// Sample the field at `point`.
    fn sample(&self, point: Point) -> Result<FieldSample, FieldError>;
}
