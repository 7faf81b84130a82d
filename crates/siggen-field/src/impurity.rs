//! Net impurity concentration profile.
//!
//! Concentrations are in units of 1e10 carriers/cm³ and negative for
//! p-type material. The profile combines an axial polynomial with a
//! radial power-law modulation:
//!
//! ```text
//! base(z) = z0 + gradient·z_cm + quadratic·(1 - (2z/L - 1)²)
//! f(r)    = (r/R)^power
//! N(r, z) = base(z)·(1 + (mult - 1)·f(r)) + add·f(r)
//! ```

use siggen_core::{CylPoint, Geometry, GeometryError};

/// Largest net impurity magnitude accepted anywhere in the crystal.
const MAX_IMPURITY: f64 = 10.0;

/// Parameters of the net impurity concentration.
#[derive(Clone, Debug, PartialEq)]
pub struct ImpurityProfile {
    /// Concentration at `z = 0` on the axis.
    pub z0: f64,
    /// Linear axial gradient (1e10/cm⁴).
    pub gradient: f64,
    /// Excess concentration at `z = L/2` over the linear profile.
    pub quadratic: f64,
    /// Additive radial term at `r = R`.
    pub radial_add: f64,
    /// Multiplicative radial factor at `r = R`. 1 for none.
    pub radial_mult: f64,
    /// Power of the radial dependence.
    pub radial_power: f64,
}

impl Default for ImpurityProfile {
    fn default() -> Self {
        Self {
            z0: -0.2,
            gradient: 0.0,
            quadratic: 0.0,
            radial_add: 0.0,
            radial_mult: 1.0,
            radial_power: 2.0,
        }
    }
}

impl ImpurityProfile {
    /// A uniform concentration.
    pub fn uniform(value: f64) -> Self {
        Self {
            z0: value,
            ..Self::default()
        }
    }

    /// Net concentration at `p` inside `geometry`.
    pub fn density(&self, geometry: &Geometry, p: CylPoint) -> f64 {
        let z_cm = p.z / 10.0;
        let s = 2.0 * p.z / geometry.length - 1.0;
        let base = self.z0 + self.gradient * z_cm + self.quadratic * (1.0 - s * s);
        let f = (p.r / geometry.radius).max(0.0).powf(self.radial_power);
        base * (1.0 + (self.radial_mult - 1.0) * f) + self.radial_add * f
    }

    /// Check the profile is finite and bounded over `geometry`.
    pub fn validate(&self, geometry: &Geometry) -> Result<(), GeometryError> {
        let fields = [
            ("impurity_z0", self.z0),
            ("impurity_gradient", self.gradient),
            ("impurity_quadratic", self.quadratic),
            ("impurity_radial_add", self.radial_add),
            ("impurity_radial_mult", self.radial_mult),
            ("impurity_rpower", self.radial_power),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(GeometryError::new(name, format!("must be finite, got {v}")));
            }
        }
        if self.radial_mult <= 0.0 {
            return Err(GeometryError::new(
                "impurity_radial_mult",
                format!("must be > 0, got {}", self.radial_mult),
            ));
        }
        if self.radial_power <= 0.0 {
            return Err(GeometryError::new(
                "impurity_rpower",
                format!("must be > 0, got {}", self.radial_power),
            ));
        }

        let (r, l) = (geometry.radius, geometry.length);
        for &rr in &[0.0, r / 2.0, r] {
            for &zz in &[0.0, l / 2.0, l] {
                let n = self.density(geometry, CylPoint::new(rr, zz));
                if n.abs() > MAX_IMPURITY {
                    return Err(GeometryError::new(
                        "impurity_z0",
                        format!(
                            "concentration {n:.3} at (r={rr}, z={zz}) exceeds +/-{MAX_IMPURITY}"
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}
