//! Numerical settings for the relaxation solver.

use siggen_core::{Geometry, GeometryError};

/// Settings controlling grid resolution and relaxation convergence.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverSettings {
    /// Node spacing in mm. Must divide the crystal radius and length.
    pub grid_spacing: f64,
    /// Convergence threshold on the largest per-sweep update. Relative to
    /// the bias voltage for the potential, absolute for the weighting
    /// potential.
    pub tolerance: f64,
    /// Sweep cap per relaxation phase.
    pub max_iterations: u32,
    /// Over-relaxation factor in `(0, 2)`. `None` picks one from the grid size.
    pub relaxation: Option<f64>,
    /// Sweeps between progress-hook invocations.
    pub progress_interval: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            grid_spacing: 0.5,
            tolerance: 1e-7,
            max_iterations: 50_000,
            relaxation: None,
            progress_interval: 100,
        }
    }
}

impl SolverSettings {
    /// Set the grid spacing.
    pub fn with_grid_spacing(mut self, spacing: f64) -> Self {
        self.grid_spacing = spacing;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the per-phase sweep cap.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Fix the over-relaxation factor.
    pub fn with_relaxation(mut self, omega: f64) -> Self {
        self.relaxation = Some(omega);
        self
    }

    /// Number of cells along a dimension of length `extent`, if the spacing
    /// divides it.
    pub(crate) fn cells(&self, extent: f64) -> Option<usize> {
        let n = extent / self.grid_spacing;
        let rounded = n.round();
        if (n - rounded).abs() < 1e-6 && rounded >= 2.0 {
            Some(rounded as usize)
        } else {
            None
        }
    }

    /// The over-relaxation factor for a grid of `rows` x `cols` nodes.
    pub fn omega(&self, rows: usize, cols: usize) -> f64 {
        self.relaxation.unwrap_or_else(|| {
            let n = rows.max(cols) as f64;
            2.0 / (1.0 + (std::f64::consts::PI / (2.0 * n)).sin())
        })
    }

    /// Check the settings against `geometry`.
    pub fn validate(&self, geometry: &Geometry) -> Result<(), GeometryError> {
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return Err(GeometryError::new(
                "xtal_grid",
                format!("must be > 0, got {}", self.grid_spacing),
            ));
        }
        if self.cells(geometry.radius).is_none() || self.cells(geometry.length).is_none() {
            return Err(GeometryError::new(
                "xtal_grid",
                format!(
                    "spacing {} must divide radius {} and length {} into at least 2 cells",
                    self.grid_spacing, geometry.radius, geometry.length
                ),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(GeometryError::new(
                "solver_tolerance",
                format!("must be > 0, got {}", self.tolerance),
            ));
        }
        if self.max_iterations == 0 {
            return Err(GeometryError::new("max_iterations", "must be >= 1"));
        }
        if let Some(omega) = self.relaxation {
            if !(omega > 0.0 && omega < 2.0) {
                return Err(GeometryError::new(
                    "relaxation",
                    format!("must lie in (0, 2), got {omega}"),
                ));
            }
        }
        if self.progress_interval == 0 {
            return Err(GeometryError::new("progress_interval", "must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_must_divide_dimensions() {
        let g = Geometry::default();
        assert!(SolverSettings::default().validate(&g).is_ok());
        assert!(SolverSettings::default()
            .with_grid_spacing(1.0)
            .validate(&g)
            .is_ok());
        let err = SolverSettings::default()
            .with_grid_spacing(0.7)
            .validate(&g)
            .unwrap_err();
        assert_eq!(err.parameter, "xtal_grid");
        let err = SolverSettings::default()
            .with_grid_spacing(20.0)
            .validate(&g)
            .unwrap_err();
        assert_eq!(err.parameter, "xtal_grid");
    }

    #[test]
    fn automatic_omega_is_over_relaxing() {
        let s = SolverSettings::default();
        let w = s.omega(61, 101);
        assert!(w > 1.9 && w < 2.0);
        assert_eq!(s.with_relaxation(1.5).omega(61, 101), 1.5);
    }

    #[test]
    fn rejects_bad_relaxation() {
        let g = Geometry::default();
        let err = SolverSettings::default()
            .with_relaxation(2.5)
            .validate(&g)
            .unwrap_err();
        assert_eq!(err.parameter, "relaxation");
    }
}
