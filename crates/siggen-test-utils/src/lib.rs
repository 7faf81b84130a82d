//! Test utilities and mock types for siggen development.
//!
//! Provides a mock [`FieldSampler`] ([`UniformField`]) for exercising the
//! drift integrator and pulse synthesizer without a field solve, and
//! standard detector configurations in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{centre_site, reference_config, small_config};

use siggen_core::{FieldError, FieldSample, FieldSampler, Geometry, Point, Vector};

/// Mock implementation of [`FieldSampler`].
///
/// Returns the same electric field everywhere inside the crystal's
/// bounding box, with a weighting potential falling linearly from 1 at
/// `z = 0` to 0 at `z = L`. Points outside the bounding box are
/// [`FieldError::OutOfBounds`], as with a solved grid.
pub struct UniformField {
    geometry: Geometry,
    efield: Vector,
}

impl UniformField {
    pub fn new(geometry: Geometry, efield: Vector) -> Self {
        Self { geometry, efield }
    }
}

impl FieldSampler for UniformField {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn sample(&self, point: Point) -> Result<FieldSample, FieldError> {
        let c = point.to_cyl();
        let (r_max, z_max) = (self.geometry.radius, self.geometry.length);
        if !(c.r <= r_max && c.z >= 0.0 && c.z <= z_max) {
            return Err(FieldError::OutOfBounds {
                r: c.r,
                z: c.z,
                r_max,
                z_max,
            });
        }
        Ok(FieldSample {
            efield: self.efield,
            weighting_potential: (1.0 - c.z / z_max).clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_field_bounds() {
        let f = UniformField::new(Geometry::default(), Vector::new(1.0, 0.0, 0.0));
        let s = f.sample(Point::new(0.0, 0.0, 25.0)).unwrap();
        assert_eq!(s.efield, Vector::new(1.0, 0.0, 0.0));
        assert_eq!(s.weighting_potential, 0.5);
        assert!(f.sample(Point::new(0.0, 0.0, -1.0)).is_err());
        assert!(f.sample(Point::new(31.0, 0.0, 1.0)).is_err());
    }
}
