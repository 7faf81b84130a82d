//! Cartesian and cylindrical coordinates.
//!
//! All lengths are in millimetres. The crystal axis is the z axis, with
//! the point-contact face at `z = 0`.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A position in Cartesian coordinates (mm).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
    /// z coordinate (along the crystal axis).
    pub z: f64,
}

/// A 3-component vector. Shares its representation with [`Point`].
pub type Vector = Point;

impl Point {
    /// The origin (centre of the point-contact face).
    pub const ORIGIN: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a point from Cartesian components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a point from cylindrical components `(r, phi, z)`,
    /// with `phi` in radians.
    pub fn from_cylindrical(r: f64, phi: f64, z: f64) -> Self {
        Self {
            x: r * phi.cos(),
            y: r * phi.sin(),
            z,
        }
    }

    /// Project onto the axisymmetric `(r, z)` half-plane.
    pub fn to_cyl(self) -> CylPoint {
        CylPoint {
            r: self.x.hypot(self.y),
            z: self.z,
        }
    }

    /// Euclidean norm.
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (self - other).norm()
    }

    /// Returns `true` if all components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// A position in the axisymmetric `(r, z)` half-plane (mm).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CylPoint {
    /// Radial distance from the crystal axis (always `>= 0`).
    pub r: f64,
    /// Height above the point-contact face.
    pub z: f64,
}

impl CylPoint {
    /// Create a cylindrical point.
    pub const fn new(r: f64, z: f64) -> Self {
        Self { r, z }
    }
}

impl fmt::Display for CylPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r={:.3}, z={:.3})", self.r, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cylindrical_round_trip_on_axis() {
        let p = Point::from_cylindrical(0.0, 1.3, 7.0);
        let c = p.to_cyl();
        assert_eq!(c.r, 0.0);
        assert_eq!(c.z, 7.0);
    }

    #[test]
    fn vector_arithmetic() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, Point::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Point::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Point::new(-1.0, -2.0, -3.0));
        assert!((Point::new(3.0, 4.0, 0.0).norm() - 5.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn radius_is_preserved(r in 0.0f64..100.0, phi in -6.3f64..6.3, z in 0.0f64..100.0) {
            let c = Point::from_cylindrical(r, phi, z).to_cyl();
            prop_assert!((c.r - r).abs() < 1e-9);
            prop_assert!((c.z - z).abs() < 1e-12);
        }
    }
}
