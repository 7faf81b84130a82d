//! Signal results and carrier warnings.

use std::fmt;

use siggen_core::{CarrierKind, DetectorInstanceId, ParameterVersion, Point};
use siggen_drift::TrajectoryStatus;
use siggen_pulse::Waveform;

use crate::metrics::SignalMetrics;

/// Why a carrier did not reach an electrode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Left the crystal somewhere other than an electrode, or started
    /// outside the active volume.
    Escaped,
    /// Still drifting when the calculation window ran out.
    TimedOut,
    /// Stopped moving at a field null.
    Stalled,
}

impl WarningKind {
    /// The warning for a trajectory that ended with `status`, if any.
    pub fn from_status(status: TrajectoryStatus) -> Option<Self> {
        match status {
            TrajectoryStatus::Collected(_) => None,
            TrajectoryStatus::Escaped => Some(Self::Escaped),
            TrajectoryStatus::TimedOut => Some(Self::TimedOut),
            TrajectoryStatus::Stalled => Some(Self::Stalled),
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Escaped => write!(f, "escaped"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Stalled => write!(f, "stalled"),
        }
    }
}

/// A carrier whose charge was only partly collected.
///
/// The carrier's partial trajectory still contributes to the waveform.
#[derive(Clone, Debug, PartialEq)]
pub struct CarrierWarning {
    /// Index of the originating site in the event.
    pub site_index: usize,
    /// The drifting species.
    pub carrier: CarrierKind,
    /// How the trajectory ended.
    pub kind: WarningKind,
    /// Number of positions in the trajectory, the start included.
    pub trajectory_len: usize,
    /// Last position reached.
    pub final_position: Point,
}

impl fmt::Display for CarrierWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "site {}: {} {} at {} after {} samples",
            self.site_index, self.carrier, self.kind, self.final_position, self.trajectory_len
        )
    }
}

/// The outcome of a signal calculation.
#[derive(Clone, Debug)]
pub struct SignalResult {
    /// The readout waveform, in keV-equivalent collected charge.
    pub waveform: Waveform,
    /// Carriers that did not reach an electrode.
    pub warnings: Vec<CarrierWarning>,
    /// Timing and workload of the call.
    pub metrics: SignalMetrics,
    /// Parameter version of the detector state used.
    pub parameter_version: ParameterVersion,
    /// The detector the signal was computed for.
    pub detector: DetectorInstanceId,
}

impl SignalResult {
    /// Returns `true` if every carrier was collected.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warnings of one kind.
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &CarrierWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siggen_core::Electrode;

    #[test]
    fn collected_trajectories_do_not_warn() {
        assert_eq!(
            WarningKind::from_status(TrajectoryStatus::Collected(Electrode::PointContact)),
            None
        );
        assert_eq!(
            WarningKind::from_status(TrajectoryStatus::TimedOut),
            Some(WarningKind::TimedOut)
        );
    }

    #[test]
    fn warning_display() {
        let w = CarrierWarning {
            site_index: 1,
            carrier: CarrierKind::Electron,
            kind: WarningKind::Escaped,
            trajectory_len: 1,
            final_position: Point::new(30.0, 0.0, 25.0),
        };
        assert!(w.to_string().starts_with("site 1: electron escaped"));
    }
}
