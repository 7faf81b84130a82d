//! Successive over-relaxation on the axisymmetric `(r, z)` grid.
//!
//! Node `(i, j)` sits at `r = i·h`, `z = j·h` and is stored at flat index
//! `i·cols + j`. Interior bulk nodes use the five-point cylindrical
//! stencil:
//!
//! ```text
//! V = ((1 + 1/2i)·V[i+1] + (1 - 1/2i)·V[i-1] + V[j+1] + V[j-1] + h²·ρ/ε) / 4
//! ```
//!
//! Axis nodes (`i = 0`) use the `r → 0` limit of the Laplacian. Bulk nodes
//! on the passivated bottom face mirror their upper neighbour (zero normal
//! field). Contact nodes are Dirichlet.

use std::ops::ControlFlow;
use std::time::Instant;

use siggen_core::{CylPoint, FieldError, Geometry};

use crate::grid::{FieldGrid, NodeKind, SolveStats};
use crate::impurity::ImpurityProfile;
use crate::settings::SolverSettings;

/// Elementary charge over the permittivity of germanium, in V/mm² per
/// 1e10 carriers/cm³.
pub const E_OVER_EPS: f64 = 11.310;

/// Which field a relaxation pass is solving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolvePhase {
    /// Poisson's equation for the electric potential.
    Potential,
    /// Laplace's equation for the point-contact weighting potential.
    WeightingPotential,
}

/// Snapshot passed to a progress hook.
#[derive(Clone, Copy, Debug)]
pub struct SolveProgress {
    /// The field being relaxed.
    pub phase: SolvePhase,
    /// Sweeps completed in this phase.
    pub iteration: u32,
    /// Largest per-node update of the most recent sweep.
    pub residual: f64,
    /// Threshold the residual must drop below.
    pub tolerance: f64,
}

/// Solve the potential, weighting potential and electric field.
///
/// Inputs are assumed validated; a spacing that does not divide the
/// crystal yields [`FieldError::InvalidGrid`].
pub fn solve(
    geometry: &Geometry,
    impurity: &ImpurityProfile,
    bias_voltage: f64,
    settings: &SolverSettings,
) -> Result<FieldGrid, FieldError> {
    solve_with_progress(geometry, impurity, bias_voltage, settings, |_| {
        ControlFlow::Continue(())
    })
}

/// Like [`solve`], invoking `hook` every `settings.progress_interval`
/// sweeps. Returning [`ControlFlow::Break`] aborts with
/// [`FieldError::Cancelled`].
pub fn solve_with_progress<F>(
    geometry: &Geometry,
    impurity: &ImpurityProfile,
    bias_voltage: f64,
    settings: &SolverSettings,
    mut hook: F,
) -> Result<FieldGrid, FieldError>
where
    F: FnMut(&SolveProgress) -> ControlFlow<()>,
{
    let start = Instant::now();
    let h = settings.grid_spacing;
    let (rows, cols) = match (settings.cells(geometry.radius), settings.cells(geometry.length)) {
        (Some(nr), Some(nz)) => (nr + 1, nz + 1),
        _ => {
            return Err(FieldError::InvalidGrid {
                reason: format!(
                    "spacing {h} does not divide radius {} and length {}",
                    geometry.radius, geometry.length
                ),
            })
        }
    };
    let omega = settings.omega(rows, cols);
    let mut kind = classify(geometry, rows, cols, h);

    tracing::debug!(rows, cols, spacing = h, omega, bias_voltage, "solving detector fields");

    // ── Potential ───────────────────────────────────────────────

    let source: Vec<f64> = (0..rows * cols)
        .map(|idx| match kind[idx] {
            NodeKind::Bulk => {
                let p = CylPoint::new((idx / cols) as f64 * h, (idx % cols) as f64 * h);
                h * h * E_OVER_EPS * impurity.density(geometry, p)
            }
            _ => 0.0,
        })
        .collect();

    let mut potential: Vec<f64> = kind
        .iter()
        .map(|k| match k {
            NodeKind::PointContact => 0.0,
            NodeKind::OuterContact => bias_voltage,
            _ => bias_voltage / 2.0,
        })
        .collect();
    let mut clamped = vec![false; rows * cols];

    let pass = Pass {
        rows,
        cols,
        omega,
        kind: &kind,
        source: Some(source.as_slice()),
        clamp: Some((bias_voltage.min(0.0), bias_voltage.max(0.0))),
        tolerance: settings.tolerance * bias_voltage.abs(),
        max_iterations: settings.max_iterations,
        progress_interval: settings.progress_interval,
        phase: SolvePhase::Potential,
    };
    let (potential_iterations, potential_residual) =
        pass.relax(&mut potential, &mut clamped, &mut hook)?;

    let mut undepleted_nodes = 0usize;
    for (k, &c) in kind.iter_mut().zip(&clamped) {
        if c && *k == NodeKind::Bulk {
            *k = NodeKind::Undepleted;
            undepleted_nodes += 1;
        }
    }
    if undepleted_nodes > 0 {
        tracing::warn!(
            undepleted_nodes,
            bias_voltage,
            "detector is not fully depleted; undepleted nodes carry zero field"
        );
    }

    // ── Weighting potential ─────────────────────────────────────

    let wp_kind: Vec<NodeKind> = kind
        .iter()
        .map(|&k| match k {
            NodeKind::Undepleted => NodeKind::Bulk,
            other => other,
        })
        .collect();
    let mut weighting: Vec<f64> = wp_kind
        .iter()
        .map(|k| match k {
            NodeKind::PointContact => 1.0,
            _ => 0.0,
        })
        .collect();
    let wp_pass = Pass {
        rows,
        cols,
        omega,
        kind: &wp_kind,
        source: None,
        clamp: None,
        tolerance: settings.tolerance,
        max_iterations: settings.max_iterations,
        progress_interval: settings.progress_interval,
        phase: SolvePhase::WeightingPotential,
    };
    let mut unused = vec![false; rows * cols];
    let (wp_iterations, wp_residual) = wp_pass.relax(&mut weighting, &mut unused, &mut hook)?;

    // ── Electric field ──────────────────────────────────────────

    let (efield_r, efield_z) = gradient(geometry, &potential, &kind, rows, cols, h);

    let stats = SolveStats {
        potential_iterations,
        potential_residual,
        wp_iterations,
        wp_residual,
        undepleted_nodes,
        elapsed_us: start.elapsed().as_micros() as u64,
    };
    tracing::debug!(
        potential_iterations,
        wp_iterations,
        elapsed_us = stats.elapsed_us,
        "field solve converged"
    );

    Ok(FieldGrid::from_parts(
        geometry.clone(),
        bias_voltage,
        h,
        rows,
        cols,
        potential,
        weighting,
        efield_r,
        efield_z,
        kind,
        stats,
    ))
}

/// Assign a boundary role to every node.
fn classify(geometry: &Geometry, rows: usize, cols: usize, h: f64) -> Vec<NodeKind> {
    let mut kind = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            let p = CylPoint::new(i as f64 * h, j as f64 * h);
            let k = if geometry.in_point_contact(p) {
                NodeKind::PointContact
            } else if i == rows - 1
                || j == cols - 1
                || (j == 0 && p.r >= geometry.wrap_around_radius)
                || !geometry.in_active_volume(p)
            {
                NodeKind::OuterContact
            } else {
                NodeKind::Bulk
            };
            kind.push(k);
        }
    }
    kind
}

/// One relaxation problem: which nodes move, what drives them, when to stop.
#[derive(Clone, Copy)]
struct Pass<'a> {
    rows: usize,
    cols: usize,
    omega: f64,
    kind: &'a [NodeKind],
    source: Option<&'a [f64]>,
    clamp: Option<(f64, f64)>,
    tolerance: f64,
    max_iterations: u32,
    progress_interval: u32,
    phase: SolvePhase,
}

impl Pass<'_> {
    /// Sweep until the largest update drops below the tolerance.
    ///
    /// Returns `(iterations, residual)`. Nodes whose relaxed value had to be
    /// clamped on the final sweep are flagged in `clamped`.
    fn relax<F>(
        &self,
        values: &mut [f64],
        clamped: &mut [bool],
        hook: &mut F,
    ) -> Result<(u32, f64), FieldError>
    where
        F: FnMut(&SolveProgress) -> ControlFlow<()>,
    {
        let cols = self.cols;
        let mut iteration = 0u32;
        loop {
            let mut residual = 0.0f64;
            for i in 0..self.rows {
                for j in 0..cols {
                    let idx = i * cols + j;
                    if self.kind[idx] != NodeKind::Bulk {
                        continue;
                    }
                    let up = values[idx + 1];
                    let down = if j == 0 { up } else { values[idx - 1] };
                    let src = self.source.map_or(0.0, |s| s[idx]);
                    let target = if i == 0 {
                        (4.0 * values[idx + cols] + up + down + src) / 6.0
                    } else {
                        let a = 0.5 / i as f64;
                        ((1.0 + a) * values[idx + cols]
                            + (1.0 - a) * values[idx - cols]
                            + up
                            + down
                            + src)
                            / 4.0
                    };
                    let old = values[idx];
                    let mut v = old + self.omega * (target - old);
                    if let Some((lo, hi)) = self.clamp {
                        let c = v.clamp(lo, hi);
                        clamped[idx] = c != v;
                        v = c;
                    }
                    residual = residual.max((v - old).abs());
                    values[idx] = v;
                }
            }
            iteration += 1;

            if residual < self.tolerance {
                return Ok((iteration, residual));
            }
            if iteration >= self.max_iterations || !residual.is_finite() {
                return Err(FieldError::Convergence {
                    iterations: iteration,
                    residual,
                    tolerance: self.tolerance,
                });
            }
            if iteration % self.progress_interval == 0 {
                let progress = SolveProgress {
                    phase: self.phase,
                    iteration,
                    residual,
                    tolerance: self.tolerance,
                };
                tracing::trace!(phase = ?progress.phase, iteration, residual, "relaxation progress");
                if hook(&progress).is_break() {
                    return Err(FieldError::Cancelled {
                        iterations: iteration,
                    });
                }
            }
        }
    }
}

/// `E = -∇V` by finite differences (V/mm).
///
/// Central differences inside the grid, one-sided at the edges. `E_r` is 0
/// on the axis; `E_z` is 0 on the passivated bottom face. Undepleted nodes
/// carry no field.
fn gradient(
    geometry: &Geometry,
    potential: &[f64],
    kind: &[NodeKind],
    rows: usize,
    cols: usize,
    h: f64,
) -> (Vec<f64>, Vec<f64>) {
    let mut er = vec![0.0; rows * cols];
    let mut ez = vec![0.0; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            let idx = i * cols + j;
            if kind[idx] == NodeKind::Undepleted {
                continue;
            }
            er[idx] = if i == 0 {
                0.0
            } else if i == rows - 1 {
                -(potential[idx] - potential[idx - cols]) / h
            } else {
                -(potential[idx + cols] - potential[idx - cols]) / (2.0 * h)
            };
            let passivated = j == 0
                && kind[idx] == NodeKind::Bulk
                && geometry.on_passivated_surface(CylPoint::new(i as f64 * h, 0.0));
            ez[idx] = if passivated {
                0.0
            } else if j == 0 {
                -(potential[idx + 1] - potential[idx]) / h
            } else if j == cols - 1 {
                -(potential[idx] - potential[idx - 1]) / h
            } else {
                -(potential[idx + 1] - potential[idx - 1]) / (2.0 * h)
            };
        }
    }
    (er, ez)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> (Geometry, SolverSettings) {
        let g = Geometry {
            radius: 10.0,
            length: 10.0,
            pc_radius: 1.0,
            pc_length: 1.0,
            wrap_around_radius: 5.0,
            ..Geometry::default()
        };
        (g, SolverSettings::default().with_grid_spacing(1.0))
    }

    #[test]
    fn classify_marks_edges_and_contact() {
        let (g, s) = small();
        let kind = classify(&g, 11, 11, s.grid_spacing);
        assert_eq!(kind[0], NodeKind::PointContact);
        assert_eq!(kind[11 + 1], NodeKind::PointContact);
        assert_eq!(kind[10 * 11 + 5], NodeKind::OuterContact);
        assert_eq!(kind[5 * 11 + 10], NodeKind::OuterContact);
        assert_eq!(kind[6 * 11], NodeKind::OuterContact);
        assert_eq!(kind[3 * 11], NodeKind::Bulk);
        assert_eq!(kind[5 * 11 + 5], NodeKind::Bulk);
    }

    #[test]
    fn laplace_solution_stays_between_contacts() {
        let (g, s) = small();
        let grid = solve(&g, &ImpurityProfile::uniform(0.0), 1000.0, &s).unwrap();
        for &v in grid.potential() {
            assert!((-1e-9..=1000.0 + 1e-9).contains(&v));
        }
        for &w in grid.weighting_potential() {
            assert!((-1e-9..=1.0 + 1e-9).contains(&w));
        }
        assert!(grid.is_fully_depleted());
    }

    #[test]
    fn iteration_cap_reports_convergence_error() {
        let (g, s) = small();
        let err = solve(&g, &ImpurityProfile::default(), 1000.0, &s.with_max_iterations(2))
            .unwrap_err();
        assert!(matches!(err, FieldError::Convergence { iterations: 2, .. }));
    }

    #[test]
    fn indivisible_spacing_is_invalid_grid() {
        let (g, s) = small();
        let err = solve(&g, &ImpurityProfile::default(), 1000.0, &s.with_grid_spacing(3.0))
            .unwrap_err();
        assert!(matches!(err, FieldError::InvalidGrid { .. }));
    }
}
