//! The complete electrostatic problem for one detector.

use std::ops::ControlFlow;

use siggen_core::{FieldError, Geometry, GeometryError};

use crate::grid::FieldGrid;
use crate::impurity::ImpurityProfile;
use crate::settings::SolverSettings;
use crate::solver::{self, SolveProgress};

/// Largest bias magnitude accepted (V).
pub const MAX_BIAS_VOLTAGE: f64 = 10_000.0;

/// Geometry, impurity, bias and numerics: everything the field depends on.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldModel {
    /// Crystal dimensions and contacts.
    pub geometry: Geometry,
    /// Net impurity profile.
    pub impurity: ImpurityProfile,
    /// Outer-contact bias (V). The point contact is at 0 V.
    pub bias_voltage: f64,
    /// Relaxation settings.
    pub solver: SolverSettings,
}

impl Default for FieldModel {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            impurity: ImpurityProfile::default(),
            bias_voltage: 2000.0,
            solver: SolverSettings::default(),
        }
    }
}

impl FieldModel {
    /// Validate every field-affecting parameter.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.geometry.validate()?;
        self.impurity.validate(&self.geometry)?;
        let hv = self.bias_voltage;
        if !hv.is_finite() || hv == 0.0 || hv.abs() > MAX_BIAS_VOLTAGE {
            return Err(GeometryError::new(
                "xtal_hv",
                format!("bias must be non-zero with magnitude <= {MAX_BIAS_VOLTAGE} V, got {hv}"),
            ));
        }
        self.solver.validate(&self.geometry)
    }

    /// Solve the fields.
    pub fn solve(&self) -> Result<FieldGrid, FieldError> {
        solver::solve(
            &self.geometry,
            &self.impurity,
            self.bias_voltage,
            &self.solver,
        )
    }

    /// Solve the fields, reporting progress to `hook`.
    pub fn solve_with_progress<F>(&self, hook: F) -> Result<FieldGrid, FieldError>
    where
        F: FnMut(&SolveProgress) -> ControlFlow<()>,
    {
        solver::solve_with_progress(
            &self.geometry,
            &self.impurity,
            self.bias_voltage,
            &self.solver,
            hook,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_valid() {
        assert!(FieldModel::default().validate().is_ok());
    }

    #[test]
    fn bias_limits() {
        for hv in [0.0, 20_000.0, f64::INFINITY] {
            let m = FieldModel {
                bias_voltage: hv,
                ..FieldModel::default()
            };
            assert_eq!(m.validate().unwrap_err().parameter, "xtal_hv");
        }
        let m = FieldModel {
            bias_voltage: -3000.0,
            ..FieldModel::default()
        };
        assert!(m.validate().is_ok());
    }
}
