//! Per-call performance metrics for signal generation.
//!
//! [`SignalMetrics`] captures where the time of one `make_signal` call
//! went and how much work the integrator did.

/// Timing and workload metrics collected during a single signal calculation.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignalMetrics {
    /// Wall-clock time for the entire call.
    pub total_us: u64,
    /// Time spent fetching the field grid, including a solve if the
    /// detector had none cached.
    pub fetch_us: u64,
    /// Time spent integrating carrier trajectories.
    pub drift_us: u64,
    /// Time spent synthesizing the waveform.
    pub synth_us: u64,
    /// Number of carriers drifted (two per sub-cloud).
    pub carriers: usize,
    /// Total positions across all trajectories.
    pub trajectory_points: usize,
    /// Carriers that reached an electrode.
    pub collected: usize,
}

pub(crate) fn micros(elapsed: std::time::Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = SignalMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.fetch_us, 0);
        assert_eq!(m.drift_us, 0);
        assert_eq!(m.synth_us, 0);
        assert_eq!(m.carriers, 0);
        assert_eq!(m.trajectory_points, 0);
        assert_eq!(m.collected, 0);
    }

    #[test]
    fn micros_saturates() {
        assert_eq!(micros(std::time::Duration::from_millis(3)), 3000);
        assert_eq!(micros(std::time::Duration::MAX), u64::MAX);
    }
}
