//! Pulse synthesis for the siggen detector-signal simulator.
//!
//! Converts carrier trajectories into the charge waveform seen by the
//! point-contact readout: the Shockley–Ramo induced current of every
//! carrier is accumulated on a fine calculation grid, integrated to
//! charge, shaped by the preamplifier response and resampled to the
//! output period.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod resample;
pub mod response;
pub mod synth;
pub mod timing;
pub mod waveform;

pub use error::PulseError;
pub use resample::Resampling;
pub use response::PreampResponse;
pub use synth::synthesize;
pub use timing::Timing;
pub use waveform::Waveform;
