//! Carrier trajectories.

use std::fmt;

use siggen_core::{CarrierKind, Electrode, Point};

/// How a trajectory ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrajectoryStatus {
    /// The carrier reached an electrode.
    Collected(Electrode),
    /// The carrier left the active volume away from any electrode, or
    /// started outside it.
    Escaped,
    /// The step budget ran out before collection.
    TimedOut,
    /// The carrier stopped moving.
    Stalled,
}

impl TrajectoryStatus {
    /// Returns `true` for a clean collection.
    pub fn is_collected(self) -> bool {
        matches!(self, Self::Collected(_))
    }
}

impl fmt::Display for TrajectoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collected(e) => write!(f, "collected at {e}"),
            Self::Escaped => write!(f, "escaped"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Stalled => write!(f, "stalled"),
        }
    }
}

/// Positions of one drifting carrier at uniform time steps.
///
/// Point `k` is the position at `t = k·dt` ns. The first point is the
/// starting position.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// The drifting species.
    pub carrier: CarrierKind,
    /// Amplitude weight of this carrier's induced charge (energy share, keV).
    pub weight: f64,
    /// Time step between points (ns).
    pub dt: f64,
    /// Positions in time order.
    pub points: Vec<Point>,
    /// How the trajectory ended.
    pub status: TrajectoryStatus,
}

impl Trajectory {
    /// Signed weight: species charge times amplitude weight.
    pub fn charge(&self) -> f64 {
        self.carrier.charge() * self.weight
    }

    /// Set the amplitude weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drift time from the first to the last sample (ns).
    pub fn duration(&self) -> f64 {
        self.points.len().saturating_sub(1) as f64 * self.dt
    }

    /// Last recorded position.
    pub fn final_position(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// `(time, position)` pairs.
    pub fn samples(&self) -> impl Iterator<Item = (f64, Point)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(move |(k, &p)| (k as f64 * self.dt, p))
    }
}
