//! Charge-carrier species.

use std::fmt;

/// The species of a drifting charge cloud.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CarrierKind {
    /// Electron cloud (charge −1). Drifts against the electric field.
    Electron,
    /// Hole cloud (charge +1). Drifts along the electric field.
    Hole,
}

impl CarrierKind {
    /// Both species, in the order the engine integrates them.
    pub const ALL: [CarrierKind; 2] = [CarrierKind::Hole, CarrierKind::Electron];

    /// Signed unit charge.
    pub fn charge(self) -> f64 {
        match self {
            Self::Electron => -1.0,
            Self::Hole => 1.0,
        }
    }
}

impl fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electron => write!(f, "electron"),
            Self::Hole => write!(f, "hole"),
        }
    }
}
