//! Field-dependent drift velocity of holes and electrons in germanium.
//!
//! The speed follows the Caughey–Thomas form
//!
//! ```text
//! v(E) = μ0·E / (1 + (E/E0)^β)^(1/β)
//! ```
//!
//! with `E` in V/cm and `v` in cm/s; results are returned in mm/ns.
//! Parameters are quoted at 77 K. Other crystal temperatures scale the
//! speed by the ratio of Omar–Reggiani velocities at the two
//! temperatures.

use siggen_core::{CarrierKind, GeometryError, Vector};

/// Reference temperature of the mobility parameters (K).
pub const REFERENCE_TEMPERATURE: f64 = 77.0;

/// Accepted crystal temperature range (K).
pub const TEMPERATURE_RANGE: (f64, f64) = (40.0, 120.0);

/// V/mm to V/cm.
const VPMM_TO_VPCM: f64 = 10.0;
/// cm/s to mm/ns.
const CMPS_TO_MMPNS: f64 = 1e-8;

/// Caughey–Thomas parameters for one carrier species.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MobilityParams {
    /// Low-field mobility (cm²/V/s).
    pub mu0: f64,
    /// Shape exponent of the saturation knee.
    pub beta: f64,
    /// Field at the saturation knee (V/cm).
    pub e0: f64,
}

impl MobilityParams {
    /// Holes along ⟨100⟩ at 77 K.
    pub const HOLE_77K: Self = Self {
        mu0: 61_824.0,
        beta: 0.942,
        e0: 185.0,
    };

    /// Electrons along ⟨100⟩ at 77 K.
    pub const ELECTRON_77K: Self = Self {
        mu0: 38_609.0,
        beta: 0.805,
        e0: 511.0,
    };

    /// Drift speed (mm/ns) at field magnitude `e` (V/mm).
    pub fn speed(&self, e: f64) -> f64 {
        let e = e.abs() * VPMM_TO_VPCM;
        let knee = (1.0 + (e / self.e0).powf(self.beta)).powf(1.0 / self.beta);
        self.mu0 * e / knee * CMPS_TO_MMPNS
    }

    fn validate(&self, prefix: Prefix) -> Result<(), GeometryError> {
        for (name, v) in [
            (prefix.mu0, self.mu0),
            (prefix.beta, self.beta),
            (prefix.e0, self.e0),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(GeometryError::new(name, format!("must be > 0, got {v}")));
            }
        }
        Ok(())
    }
}

struct Prefix {
    mu0: &'static str,
    beta: &'static str,
    e0: &'static str,
}

/// Omar–Reggiani temperature constants for one species.
struct TemperatureLaw {
    mu: f64,
    power: f64,
    b: f64,
    theta: f64,
}

impl TemperatureLaw {
    const ELECTRON: Self = Self {
        mu: 5.66e7,
        power: -1.68,
        b: 1.3e7,
        theta: 200.0,
    };
    const HOLE: Self = Self {
        mu: 1.63e9,
        power: -2.398,
        b: 1.2e7,
        theta: 200.0,
    };

    /// `(saturation velocity, critical field)` at temperature `t`.
    fn at(&self, t: f64) -> (f64, f64) {
        let mu0 = self.mu * t.powf(self.power);
        let vs = self.b * (0.5 * self.theta / t).tanh().sqrt();
        (vs, vs / mu0)
    }

    /// Ratio `v(E, t) / v(E, 77 K)` for field `e` in V/cm.
    fn factor(&self, t: f64, e: f64) -> f64 {
        let (vs1, ec1) = self.at(REFERENCE_TEMPERATURE);
        let (vs2, ec2) = self.at(t);
        let x1 = e / ec1;
        let x2 = e / ec2;
        (vs2 / vs1) * (ec1 / ec2) * ((1.0 + x1 * x1) / (1.0 + x2 * x2)).sqrt()
    }
}

/// Mobility of both species at a given crystal temperature.
#[derive(Clone, Debug, PartialEq)]
pub struct MobilityModel {
    /// Hole parameters at 77 K.
    pub holes: MobilityParams,
    /// Electron parameters at 77 K.
    pub electrons: MobilityParams,
    /// Crystal temperature (K).
    pub temperature: f64,
}

impl Default for MobilityModel {
    fn default() -> Self {
        Self {
            holes: MobilityParams::HOLE_77K,
            electrons: MobilityParams::ELECTRON_77K,
            temperature: REFERENCE_TEMPERATURE,
        }
    }
}

impl MobilityModel {
    /// Check all parameters and the temperature range.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.holes.validate(Prefix {
            mu0: "h_mu0",
            beta: "h_beta",
            e0: "h_e0",
        })?;
        self.electrons.validate(Prefix {
            mu0: "e_mu0",
            beta: "e_beta",
            e0: "e_e0",
        })?;
        let (lo, hi) = TEMPERATURE_RANGE;
        if !(self.temperature >= lo && self.temperature <= hi) {
            return Err(GeometryError::new(
                "xtal_temp",
                format!(
                    "temperature {} K outside [{lo}, {hi}] K",
                    self.temperature
                ),
            ));
        }
        Ok(())
    }

    /// Drift speed (mm/ns) of `carrier` at field magnitude `e` (V/mm).
    pub fn speed(&self, carrier: CarrierKind, e: f64) -> f64 {
        let (params, law) = match carrier {
            CarrierKind::Hole => (&self.holes, &TemperatureLaw::HOLE),
            CarrierKind::Electron => (&self.electrons, &TemperatureLaw::ELECTRON),
        };
        let v = params.speed(e);
        if self.temperature == REFERENCE_TEMPERATURE {
            v
        } else {
            v * law.factor(self.temperature, e.abs() * VPMM_TO_VPCM)
        }
    }

    /// Drift velocity (mm/ns) of `carrier` in field `efield` (V/mm).
    ///
    /// Holes move along the field, electrons against it. A vanishing field
    /// gives zero velocity.
    pub fn velocity(&self, carrier: CarrierKind, efield: Vector) -> Vector {
        let e = efield.norm();
        if !(e > 1e-12) {
            return Vector::default();
        }
        efield * (carrier.charge() * self.speed(carrier, e) / e)
    }
}
