//! Signal generation for point-contact germanium detectors.
//!
//! [`Siggen`] orchestrates the other siggen crates: it fetches a
//! detector's solved field grid, drifts a hole and an electron from every
//! charge cloud of an event through it, and synthesizes the resulting
//! readout waveform. Independent events can be swept in parallel with
//! [`Siggen::make_signals`].
//!
//! Carriers that do not reach an electrode never fail the call. Their
//! partial trajectories still contribute, and each is reported as a
//! [`CarrierWarning`] on the [`SignalResult`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batched;
pub mod cloud;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod result;

pub use batched::EventResult;
pub use cloud::{ChargeCloudModel, SubClouds, MAX_SUBCLOUDS};
pub use engine::{Siggen, SiggenConfig};
pub use error::SiggenError;
pub use metrics::SignalMetrics;
pub use result::{CarrierWarning, SignalResult, WarningKind};
