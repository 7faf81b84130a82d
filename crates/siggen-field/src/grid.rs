//! The solved field grid and its sampling.

use siggen_core::{
    CylPoint, FieldError, FieldSample, FieldSampler, Geometry, ParameterVersion, Point, Vector,
};

/// Tolerance on the grid edges when deciding whether a point is covered.
const EDGE_EPSILON: f64 = 1e-9;

/// Boundary role of a grid node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Inside the point contact: potential 0, weighting potential 1.
    PointContact,
    /// On or beyond the outer contact: potential = bias, weighting potential 0.
    OuterContact,
    /// Depleted semiconductor.
    Bulk,
    /// Semiconductor whose potential was pinned to a contact value; no field.
    Undepleted,
}

/// Convergence and timing information for a solve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolveStats {
    /// Sweeps used by the potential relaxation.
    pub potential_iterations: u32,
    /// Final largest update of the potential relaxation (V).
    pub potential_residual: f64,
    /// Sweeps used by the weighting-potential relaxation.
    pub wp_iterations: u32,
    /// Final largest update of the weighting-potential relaxation.
    pub wp_residual: f64,
    /// Number of bulk nodes flagged undepleted.
    pub undepleted_nodes: usize,
    /// Wall-clock solve time, in microseconds.
    pub elapsed_us: u64,
}

/// Potential, weighting potential and electric field on a uniform
/// axisymmetric grid covering `[0, R] × [0, L]`.
///
/// Immutable once solved. A parameter change produces a new grid.
#[derive(Clone, Debug)]
pub struct FieldGrid {
    geometry: Geometry,
    bias_voltage: f64,
    spacing: f64,
    rows: usize,
    cols: usize,
    potential: Vec<f64>,
    weighting: Vec<f64>,
    efield_r: Vec<f64>,
    efield_z: Vec<f64>,
    kind: Vec<NodeKind>,
    stats: SolveStats,
    version: ParameterVersion,
}

impl FieldGrid {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        geometry: Geometry,
        bias_voltage: f64,
        spacing: f64,
        rows: usize,
        cols: usize,
        potential: Vec<f64>,
        weighting: Vec<f64>,
        efield_r: Vec<f64>,
        efield_z: Vec<f64>,
        kind: Vec<NodeKind>,
        stats: SolveStats,
    ) -> Self {
        debug_assert_eq!(potential.len(), rows * cols);
        debug_assert_eq!(weighting.len(), rows * cols);
        debug_assert_eq!(kind.len(), rows * cols);
        Self {
            geometry,
            bias_voltage,
            spacing,
            rows,
            cols,
            potential,
            weighting,
            efield_r,
            efield_z,
            kind,
            stats,
            version: ParameterVersion::default(),
        }
    }

    /// Tag the grid with the parameter version it was solved for.
    pub fn with_version(mut self, version: ParameterVersion) -> Self {
        self.version = version;
        self
    }

    /// The parameter version this grid was solved for.
    pub fn version(&self) -> ParameterVersion {
        self.version
    }

    /// Number of radial nodes.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of axial nodes.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Node spacing (mm).
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Bias voltage the potential was solved for (V).
    pub fn bias_voltage(&self) -> f64 {
        self.bias_voltage
    }

    /// Flat index of node `(i, j)`.
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Position of node `(i, j)`.
    pub fn node_position(&self, i: usize, j: usize) -> CylPoint {
        CylPoint::new(i as f64 * self.spacing, j as f64 * self.spacing)
    }

    /// Electric potential per node (V).
    pub fn potential(&self) -> &[f64] {
        &self.potential
    }

    /// Point-contact weighting potential per node.
    pub fn weighting_potential(&self) -> &[f64] {
        &self.weighting
    }

    /// Radial electric field per node (V/mm).
    pub fn efield_r(&self) -> &[f64] {
        &self.efield_r
    }

    /// Axial electric field per node (V/mm).
    pub fn efield_z(&self) -> &[f64] {
        &self.efield_z
    }

    /// Boundary role per node.
    pub fn node_kind(&self) -> &[NodeKind] {
        &self.kind
    }

    /// Convergence statistics from the solve.
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Returns `true` if no bulk node was found undepleted.
    pub fn is_fully_depleted(&self) -> bool {
        self.stats.undepleted_nodes == 0
    }

    /// Locate `p` in the grid: lower-left node and fractional offsets.
    fn locate(&self, p: CylPoint) -> Result<(usize, usize, f64, f64), FieldError> {
        let r_max = (self.rows - 1) as f64 * self.spacing;
        let z_max = (self.cols - 1) as f64 * self.spacing;
        let inside = p.r.is_finite()
            && p.z.is_finite()
            && p.r <= r_max + EDGE_EPSILON
            && p.z >= -EDGE_EPSILON
            && p.z <= z_max + EDGE_EPSILON;
        if !inside {
            return Err(FieldError::OutOfBounds {
                r: p.r,
                z: p.z,
                r_max,
                z_max,
            });
        }
        let fr = (p.r / self.spacing).max(0.0);
        let fz = (p.z / self.spacing).max(0.0);
        let i = (fr.floor() as usize).min(self.rows - 2);
        let j = (fz.floor() as usize).min(self.cols - 2);
        let tr = (fr - i as f64).clamp(0.0, 1.0);
        let tz = (fz - j as f64).clamp(0.0, 1.0);
        Ok((i, j, tr, tz))
    }

    fn bilinear(&self, values: &[f64], i: usize, j: usize, tr: f64, tz: f64) -> f64 {
        let a = self.index(i, j);
        let b = a + self.cols;
        values[a] * (1.0 - tr) * (1.0 - tz)
            + values[b] * tr * (1.0 - tz)
            + values[a + 1] * (1.0 - tr) * tz
            + values[b + 1] * tr * tz
    }

    /// Interpolated `(E_r, E_z, weighting potential)` at `p`.
    pub fn sample_cyl(&self, p: CylPoint) -> Result<(f64, f64, f64), FieldError> {
        let (i, j, tr, tz) = self.locate(p)?;
        Ok((
            self.bilinear(&self.efield_r, i, j, tr, tz),
            self.bilinear(&self.efield_z, i, j, tr, tz),
            self.bilinear(&self.weighting, i, j, tr, tz),
        ))
    }

    /// Interpolated electric potential at `p` (V).
    pub fn potential_at(&self, p: CylPoint) -> Result<f64, FieldError> {
        let (i, j, tr, tz) = self.locate(p)?;
        Ok(self.bilinear(&self.potential, i, j, tr, tz))
    }
}

impl FieldSampler for FieldGrid {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn sample(&self, point: Point) -> Result<FieldSample, FieldError> {
        let cyl = point.to_cyl();
        let (er, ez, wp) = self.sample_cyl(cyl)?;
        let efield = if cyl.r < 1e-9 {
            Vector::new(0.0, 0.0, ez)
        } else {
            Vector::new(er * point.x / cyl.r, er * point.y / cyl.r, ez)
        };
        Ok(FieldSample {
            efield,
            weighting_potential: wp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// A 3x3 grid with spacing 1 whose fields are linear in r and z.
    fn linear_grid() -> FieldGrid {
        let (rows, cols) = (3, 3);
        let mut pot = Vec::new();
        let mut wp = Vec::new();
        let mut er = Vec::new();
        let mut ez = Vec::new();
        for i in 0..rows {
            for j in 0..cols {
                pot.push(10.0 * i as f64 + j as f64);
                wp.push(1.0 - 0.25 * i as f64);
                er.push(2.0 * i as f64);
                ez.push(-(j as f64));
            }
        }
        let g = Geometry {
            radius: 2.0,
            length: 2.0,
            pc_radius: 0.5,
            pc_length: 0.5,
            wrap_around_radius: 1.5,
            ..Geometry::default()
        };
        FieldGrid::from_parts(
            g,
            100.0,
            1.0,
            rows,
            cols,
            pot,
            wp,
            er,
            ez,
            vec![NodeKind::Bulk; rows * cols],
            SolveStats::default(),
        )
    }

    #[test]
    fn bilinear_reproduces_linear_fields() {
        let grid = linear_grid();
        let (er, ez, wp) = grid.sample_cyl(CylPoint::new(1.5, 0.25)).unwrap();
        assert!((er - 3.0).abs() < 1e-12);
        assert!((ez + 0.25).abs() < 1e-12);
        assert!((wp - 0.625).abs() < 1e-12);
        let v = grid.potential_at(CylPoint::new(0.5, 1.5)).unwrap();
        assert!((v - 6.5).abs() < 1e-12);
    }

    #[test]
    fn far_edge_is_sampled() {
        let grid = linear_grid();
        let (er, _, _) = grid.sample_cyl(CylPoint::new(2.0, 2.0)).unwrap();
        assert!((er - 4.0).abs() < 1e-12);
    }

    #[test]
    fn outside_points_are_rejected() {
        let grid = linear_grid();
        for p in [
            CylPoint::new(2.5, 1.0),
            CylPoint::new(1.0, -0.5),
            CylPoint::new(1.0, 2.5),
            CylPoint::new(f64::NAN, 1.0),
        ] {
            assert!(matches!(
                grid.sample_cyl(p),
                Err(FieldError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn cartesian_field_points_radially() {
        let grid = linear_grid();
        let s = grid.sample(Point::new(0.0, 1.0, 1.0)).unwrap();
        assert!(s.efield.x.abs() < 1e-12);
        assert!((s.efield.y - 2.0).abs() < 1e-12);
        let on_axis = grid.sample(Point::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(on_axis.efield.x, 0.0);
        assert_eq!(on_axis.efield.y, 0.0);
    }

    proptest! {
        #[test]
        fn sampling_is_continuous(r in 0.0f64..1.999, z in 0.0f64..1.999) {
            let grid = linear_grid();
            let a = grid.sample_cyl(CylPoint::new(r, z)).unwrap();
            let b = grid.sample_cyl(CylPoint::new(r + 1e-6, z + 1e-6)).unwrap();
            prop_assert!((a.0 - b.0).abs() < 1e-4);
            prop_assert!((a.1 - b.1).abs() < 1e-4);
            prop_assert!((a.2 - b.2).abs() < 1e-4);
        }
    }
}
