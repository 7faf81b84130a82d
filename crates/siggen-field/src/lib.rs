//! Electrostatic field model for point-contact germanium detectors.
//!
//! Solves Poisson's equation for the electric potential and Laplace's
//! equation for the point-contact weighting potential on a 2D
//! axisymmetric `(r, z)` grid using successive over-relaxation, then
//! derives the electric field by finite differences.
//!
//! The result is an immutable [`FieldGrid`] that implements
//! [`FieldSampler`](siggen_core::FieldSampler) with bilinear interpolation.
//!
//! ```no_run
//! use siggen_field::FieldModel;
//!
//! let grid = FieldModel::default().solve().unwrap();
//! println!("depleted: {}", grid.is_fully_depleted());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;
pub mod impurity;
pub mod model;
pub mod settings;
pub mod solver;

pub use grid::{FieldGrid, NodeKind, SolveStats};
pub use impurity::ImpurityProfile;
pub use model::FieldModel;
pub use settings::SolverSettings;
pub use solver::{solve, solve_with_progress, SolvePhase, SolveProgress, E_OVER_EPS};
