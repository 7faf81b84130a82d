//! Energy-deposition sites.

use crate::point::Point;
use smallvec::SmallVec;

/// Inline storage for the sites of one event. Most events have few sites.
pub type SiteList = SmallVec<[InteractionSite; 4]>;

/// A single energy deposition inside the crystal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionSite {
    /// Position of the cloud centroid (mm).
    pub position: Point,
    /// Deposited energy (keV). Sets the amplitude of the site's contribution.
    pub energy: f64,
    /// Initial charge-cloud size as a FWHM (mm). `None` drifts a point charge.
    pub cloud_fwhm: Option<f64>,
}

impl InteractionSite {
    /// A point-like site at Cartesian `(x, y, z)`.
    pub fn new(x: f64, y: f64, z: f64, energy: f64) -> Self {
        Self {
            position: Point::new(x, y, z),
            energy,
            cloud_fwhm: None,
        }
    }

    /// A point-like site at cylindrical `(r, phi, z)`, `phi` in radians.
    pub fn cylindrical(r: f64, phi: f64, z: f64, energy: f64) -> Self {
        Self {
            position: Point::from_cylindrical(r, phi, z),
            energy,
            cloud_fwhm: None,
        }
    }

    /// Give the site a finite initial cloud size.
    pub fn with_cloud(mut self, fwhm: f64) -> Self {
        self.cloud_fwhm = Some(fwhm);
        self
    }

    /// Check that the site can be simulated.
    ///
    /// Coordinates must be finite, energy positive and finite, and any cloud
    /// size non-negative and finite. Whether the site lies inside the
    /// crystal is not checked here: outside sites produce escaped carriers.
    pub fn validate(&self) -> Result<(), String> {
        if !self.position.is_finite() {
            return Err(format!("position {} is not finite", self.position));
        }
        if !(self.energy.is_finite() && self.energy > 0.0) {
            return Err(format!("energy must be positive, got {}", self.energy));
        }
        if let Some(fwhm) = self.cloud_fwhm {
            if !(fwhm.is_finite() && fwhm >= 0.0) {
                return Err(format!("cloud FWHM must be >= 0, got {fwhm}"));
            }
        }
        Ok(())
    }
}
