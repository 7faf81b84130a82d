//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`DetectorInstanceId`] allocation.
static DETECTOR_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a detector.
///
/// Allocated from a monotonic atomic counter via [`DetectorInstanceId::next`].
/// Two distinct detectors always have different IDs, even if they were
/// built from identical configurations. Signal results carry the ID so a
/// caller sweeping several detectors can tell their outputs apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DetectorInstanceId(u64);

impl DetectorInstanceId {
    /// Allocate a fresh, unique instance ID. Thread-safe.
    pub fn next() -> Self {
        Self(DETECTOR_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DetectorInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracks the version of a detector's parameters.
///
/// Incremented by every successful parameter update, whether or not the
/// update invalidated the cached field grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterVersion(pub u64);

impl ParameterVersion {
    /// The version following this one.
    pub fn bumped(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ParameterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParameterVersion {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
