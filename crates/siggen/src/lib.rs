//! Siggen: signal simulation for point-contact germanium detectors.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! siggen sub-crates. For most users, adding `siggen` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use siggen::prelude::*;
//!
//! // A small 20 mm x 10 mm crystal on a coarse grid.
//! let config = DetectorConfig::from_named([
//!     ("xtal_radius", 10.0),
//!     ("xtal_length", 10.0),
//!     ("pc_radius", 1.0),
//!     ("pc_length", 1.0),
//!     ("wrap_around_radius", 5.0),
//!     ("xtal_hv", 1000.0),
//!     ("xtal_grid", 1.0),
//!     ("time_steps_calc", 1000.0),
//! ])
//! .unwrap();
//! let detector = Detector::new(config).unwrap();
//!
//! let engine = Siggen::default();
//! let site = InteractionSite::new(3.0, 0.0, 5.0, 662.0);
//! let result = engine.make_signal(&detector, &[site]).unwrap();
//!
//! // 1000 steps of 1 ns, read out every 10 ns.
//! assert_eq!(result.waveform.len(), 100);
//! assert!(result.waveform.final_value() > 0.0);
//!
//! // Changing the bias re-solves the field on the next call.
//! detector
//!     .update_parameters(&ParameterUpdate::new().bias_voltage(1500.0))
//!     .unwrap();
//! assert!(!detector.is_solved());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `siggen-core` | Points, geometry, sites, IDs, errors, the sampler trait |
//! | [`field`] | `siggen-field` | Impurity profile and the electrostatic field solver |
//! | [`drift`] | `siggen-drift` | Carrier mobility and trajectory integration |
//! | [`pulse`] | `siggen-pulse` | Signal synthesis, preamp response, resampling |
//! | [`detector`] | `siggen-detector` | Detector configuration and cached field grids |
//! | [`engine`] | `siggen-engine` | `make_signal`, charge clouds, batched sweeps |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`siggen-core`).
///
/// Contains [`types::Geometry`], [`types::InteractionSite`], the error
/// taxonomy and the [`types::FieldSampler`] trait.
pub use siggen_core as types;

/// Electrostatic field solving (`siggen-field`).
///
/// [`field::FieldModel`] describes a biased, doped crystal and solves to a
/// [`field::FieldGrid`].
pub use siggen_field as field;

/// Carrier drift (`siggen-drift`).
///
/// [`drift::MobilityModel`] and the RK4 [`drift::DriftIntegrator`].
pub use siggen_drift as drift;

/// Waveform synthesis (`siggen-pulse`).
pub use siggen_pulse as pulse;

/// Detectors with cached field grids (`siggen-detector`).
pub use siggen_detector as detector;

/// The signal generation engine (`siggen-engine`).
pub use siggen_engine as engine;

/// Common imports for typical siggen usage.
///
/// ```rust
/// use siggen::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use siggen_core::{
        CarrierKind, Electrode, Geometry, InteractionSite, ParameterVersion, Point, SiteList,
    };

    // Errors
    pub use siggen_core::{FieldError, GeometryError};

    // Field
    pub use siggen_field::{FieldGrid, FieldModel, ImpurityProfile, SolverSettings};

    // Pulse
    pub use siggen_pulse::{PreampResponse, Timing, Waveform};

    // Detector
    pub use siggen_detector::{Detector, DetectorConfig, DetectorError, ParameterUpdate};

    // Engine
    pub use siggen_engine::{
        CarrierWarning, ChargeCloudModel, Siggen, SiggenConfig, SiggenError, SignalResult,
        WarningKind,
    };
}
