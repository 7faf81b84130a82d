//! Point-contact detector geometry.
//!
//! The crystal is a cylinder of radius `radius` and height `length` whose
//! axis is the z axis. The point contact sits at the centre of the bottom
//! face (`z = 0`) as a small cylinder of `pc_radius` by `pc_length`. The
//! outer contact covers the side, the top, and the bottom face from
//! `wrap_around_radius` outward. Between the point contact and the
//! wrap-around radius the bottom face is passivated.
//!
//! All predicates work in the axisymmetric `(r, z)` half-plane.

use std::fmt;

use crate::error::GeometryError;
use crate::point::CylPoint;

/// A readout electrode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Electrode {
    /// The small central contact. Held at 0 V and read out.
    PointContact,
    /// The high-voltage outer (lithiated) contact.
    OuterContact,
}

impl fmt::Display for Electrode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointContact => write!(f, "point contact"),
            Self::OuterContact => write!(f, "outer contact"),
        }
    }
}

/// Crystal dimensions and contact layout (mm).
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    /// Crystal radius.
    pub radius: f64,
    /// Crystal height.
    pub length: f64,
    /// Point-contact radius.
    pub pc_radius: f64,
    /// Point-contact depth into the crystal.
    pub pc_length: f64,
    /// Radius at which the outer contact wraps onto the bottom face.
    pub wrap_around_radius: f64,
    /// Size of the 45° taper cut at the bottom outer corner. 0 for none.
    pub taper_length: f64,
    /// Radius of the rounding of the top outer corner. 0 for none.
    pub top_bullet_radius: f64,
    /// Thickness of the inactive layer beneath the outer contact.
    pub li_thickness: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            radius: 30.0,
            length: 50.0,
            pc_radius: 1.5,
            pc_length: 1.5,
            wrap_around_radius: 15.0,
            taper_length: 0.0,
            top_bullet_radius: 0.0,
            li_thickness: 0.0,
        }
    }
}

impl Geometry {
    /// Check the dimensions describe a buildable crystal.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let positive = |name, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(GeometryError::new(name, format!("must be > 0, got {v}")))
            }
        };
        let non_negative = |name, v: f64| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(GeometryError::new(name, format!("must be >= 0, got {v}")))
            }
        };

        positive("xtal_radius", self.radius)?;
        positive("xtal_length", self.length)?;
        positive("pc_radius", self.pc_radius)?;
        positive("pc_length", self.pc_length)?;
        positive("wrap_around_radius", self.wrap_around_radius)?;
        non_negative("taper_length", self.taper_length)?;
        non_negative("top_bullet_radius", self.top_bullet_radius)?;
        non_negative("li_thickness", self.li_thickness)?;

        if self.pc_radius >= self.radius {
            return Err(GeometryError::new(
                "pc_radius",
                format!(
                    "point contact radius {} must be smaller than crystal radius {}",
                    self.pc_radius, self.radius
                ),
            ));
        }
        if self.pc_length >= self.length {
            return Err(GeometryError::new(
                "pc_length",
                format!(
                    "point contact length {} must be smaller than crystal length {}",
                    self.pc_length, self.length
                ),
            ));
        }
        if self.wrap_around_radius <= self.pc_radius || self.wrap_around_radius > self.radius {
            return Err(GeometryError::new(
                "wrap_around_radius",
                format!(
                    "must lie in ({}, {}], got {}",
                    self.pc_radius, self.radius, self.wrap_around_radius
                ),
            ));
        }
        if self.taper_length >= self.radius - self.pc_radius || self.taper_length >= self.length {
            return Err(GeometryError::new(
                "taper_length",
                format!("taper {} does not fit the crystal", self.taper_length),
            ));
        }
        if self.top_bullet_radius >= self.radius.min(self.length) {
            return Err(GeometryError::new(
                "top_bullet_radius",
                format!("bulletization {} does not fit the crystal", self.top_bullet_radius),
            ));
        }
        if self.li_thickness * 2.0 >= self.radius.min(self.length) {
            return Err(GeometryError::new(
                "li_thickness",
                format!("dead layer {} leaves no active volume", self.li_thickness),
            ));
        }
        Ok(())
    }

    /// Returns `true` if `p` lies inside the crystal outline, contacts included.
    pub fn contains(&self, p: CylPoint) -> bool {
        if !(p.r >= 0.0 && p.r <= self.radius && p.z >= 0.0 && p.z <= self.length) {
            return false;
        }
        if self.taper_length > 0.0 && p.r - (self.radius - self.taper_length) > p.z {
            return false;
        }
        let b = self.top_bullet_radius;
        if b > 0.0 {
            let dr = p.r - (self.radius - b);
            let dz = p.z - (self.length - b);
            if dr > 0.0 && dz > 0.0 && dr * dr + dz * dz > b * b {
                return false;
            }
        }
        true
    }

    /// Returns `true` if `p` is inside the point-contact volume.
    pub fn in_point_contact(&self, p: CylPoint) -> bool {
        p.r <= self.pc_radius && p.z >= 0.0 && p.z <= self.pc_length
    }

    /// Inside the outer-contact layer. With zero thickness this is the
    /// contact surface itself.
    fn in_dead_layer(&self, p: CylPoint) -> bool {
        let li = self.li_thickness;
        p.r >= self.radius - li
            || p.z >= self.length - li
            || (p.r >= self.wrap_around_radius && p.z <= li)
    }

    /// Returns `true` if charge created at `p` drifts under the field:
    /// strictly inside the crystal, outside the point contact and the
    /// dead layer.
    pub fn in_active_volume(&self, p: CylPoint) -> bool {
        self.contains(p) && !self.in_point_contact(p) && !self.in_dead_layer(p)
    }

    /// The electrode a carrier reaches when it leaves the active volume at `p`.
    ///
    /// Returns `None` when `p` is beyond the passivated bottom surface, where
    /// no contact collects charge.
    pub fn electrode_at(&self, p: CylPoint) -> Option<Electrode> {
        if self.in_point_contact(p) {
            return Some(Electrode::PointContact);
        }
        if p.z < 0.0 {
            return if p.r <= self.pc_radius {
                Some(Electrode::PointContact)
            } else if p.r >= self.wrap_around_radius {
                Some(Electrode::OuterContact)
            } else {
                None
            };
        }
        Some(Electrode::OuterContact)
    }

    /// Returns `true` if `p` is on the passivated part of the bottom face.
    pub fn on_passivated_surface(&self, p: CylPoint) -> bool {
        p.z <= 0.0 && p.r > self.pc_radius && p.r < self.wrap_around_radius
    }

    /// Largest `(r, z)` covered by the crystal bounding box.
    pub fn extent(&self) -> CylPoint {
        CylPoint::new(self.radius, self.length)
    }
}
