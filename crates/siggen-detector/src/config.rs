//! Detector configuration and named parameters.
//!
//! [`DetectorConfig`] groups everything a detector needs: the field model
//! (geometry, impurity, bias, solver), carrier drift, signal timing and
//! the preamplifier response. Every scalar is also addressable by a
//! canonical name, so configurations can be imported from and exported
//! to flat `name = value` tables and updated piecemeal with a
//! [`ParameterUpdate`].

use indexmap::IndexMap;
use siggen_core::GeometryError;
use siggen_drift::DriftConfig;
use siggen_field::FieldModel;
use siggen_pulse::{PreampResponse, Timing};

// ── ParameterScope ─────────────────────────────────────────────────

/// What a parameter affects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterScope {
    /// Changes the electrostatic solution; invalidates a cached field grid.
    Field,
    /// Affects drift, timing or electronics only.
    Signal,
}

/// Canonical parameter names, in export order, with their scope.
pub const PARAMETERS: &[(&str, ParameterScope)] = &[
    ("xtal_radius", ParameterScope::Field),
    ("xtal_length", ParameterScope::Field),
    ("pc_radius", ParameterScope::Field),
    ("pc_length", ParameterScope::Field),
    ("wrap_around_radius", ParameterScope::Field),
    ("taper_length", ParameterScope::Field),
    ("top_bullet_radius", ParameterScope::Field),
    ("li_thickness", ParameterScope::Field),
    ("impurity_z0", ParameterScope::Field),
    ("impurity_gradient", ParameterScope::Field),
    ("impurity_quadratic", ParameterScope::Field),
    ("impurity_radial_add", ParameterScope::Field),
    ("impurity_radial_mult", ParameterScope::Field),
    ("impurity_rpower", ParameterScope::Field),
    ("xtal_hv", ParameterScope::Field),
    ("xtal_grid", ParameterScope::Field),
    ("max_iterations", ParameterScope::Field),
    ("solver_tolerance", ParameterScope::Field),
    ("xtal_temp", ParameterScope::Signal),
    ("preamp_tau", ParameterScope::Signal),
    ("decay_tau", ParameterScope::Signal),
    ("time_steps_calc", ParameterScope::Signal),
    ("step_time_calc", ParameterScope::Signal),
    ("step_time_out", ParameterScope::Signal),
    ("trap_constant", ParameterScope::Signal),
    ("stall_steps", ParameterScope::Signal),
    ("min_displacement", ParameterScope::Signal),
    ("h_mu0", ParameterScope::Signal),
    ("h_beta", ParameterScope::Signal),
    ("h_e0", ParameterScope::Signal),
    ("e_mu0", ParameterScope::Signal),
    ("e_beta", ParameterScope::Signal),
    ("e_e0", ParameterScope::Signal),
];

/// Look up the canonical name and scope of `name`.
pub fn parameter(name: &str) -> Option<(&'static str, ParameterScope)> {
    PARAMETERS.iter().copied().find(|(n, _)| *n == name)
}

fn unknown(name: &str) -> GeometryError {
    GeometryError::new("parameter", format!("unknown parameter '{name}'"))
}

/// Interpret `value` as a count for parameter `name`.
fn count(name: &'static str, value: f64) -> Result<usize, GeometryError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(GeometryError::new(
            name,
            format!("must be a non-negative integer, got {value}"),
        ))
    }
}

/// `0` means "disabled" for optional time constants.
fn optional(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

// ── DetectorConfig ─────────────────────────────────────────────────

/// Complete description of a detector and its readout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectorConfig {
    /// Field-affecting parameters.
    pub field: FieldModel,
    /// Carrier mobility and drift limits.
    pub drift: DriftConfig,
    /// Calculation and output time grids.
    pub timing: Timing,
    /// Preamplifier shaping.
    pub response: PreampResponse,
}

impl DetectorConfig {
    /// Check every parameter.
    ///
    /// Fails with the first offending parameter name.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.field.validate()?;
        self.drift.validate()?;
        self.timing.validate()?;
        self.response.validate()
    }

    /// Build a configuration from defaults overridden by `pairs`, then
    /// validate it.
    pub fn from_named<I, K>(pairs: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in pairs {
            config.set(name.as_ref(), value)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Every named parameter and its current value, in canonical order.
    ///
    /// Disabled optional time constants export as 0.
    pub fn to_named(&self) -> IndexMap<&'static str, f64> {
        PARAMETERS
            .iter()
            .filter_map(|&(name, _)| self.get(name).map(|v| (name, v)))
            .collect()
    }

    /// Current value of parameter `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        let f = &self.field;
        let g = &f.geometry;
        let imp = &f.impurity;
        let m = &self.drift.mobility;
        let v = match name {
            "xtal_radius" => g.radius,
            "xtal_length" => g.length,
            "pc_radius" => g.pc_radius,
            "pc_length" => g.pc_length,
            "wrap_around_radius" => g.wrap_around_radius,
            "taper_length" => g.taper_length,
            "top_bullet_radius" => g.top_bullet_radius,
            "li_thickness" => g.li_thickness,
            "impurity_z0" => imp.z0,
            "impurity_gradient" => imp.gradient,
            "impurity_quadratic" => imp.quadratic,
            "impurity_radial_add" => imp.radial_add,
            "impurity_radial_mult" => imp.radial_mult,
            "impurity_rpower" => imp.radial_power,
            "xtal_hv" => f.bias_voltage,
            "xtal_grid" => f.solver.grid_spacing,
            "max_iterations" => f64::from(f.solver.max_iterations),
            "solver_tolerance" => f.solver.tolerance,
            "xtal_temp" => m.temperature,
            "preamp_tau" => self.response.rise_tau,
            "decay_tau" => self.response.decay_tau.unwrap_or(0.0),
            "time_steps_calc" => self.timing.time_steps_calc as f64,
            "step_time_calc" => self.timing.step_time_calc,
            "step_time_out" => self.timing.step_time_out,
            "trap_constant" => self.timing.trap_constant.unwrap_or(0.0),
            "stall_steps" => self.drift.limits.stall_steps as f64,
            "min_displacement" => self.drift.limits.min_displacement,
            "h_mu0" => m.holes.mu0,
            "h_beta" => m.holes.beta,
            "h_e0" => m.holes.e0,
            "e_mu0" => m.electrons.mu0,
            "e_beta" => m.electrons.beta,
            "e_e0" => m.electrons.e0,
            _ => return None,
        };
        Some(v)
    }

    /// Set parameter `name` without validating the result.
    ///
    /// Returns the parameter's scope. Unknown names and non-integral
    /// counts are rejected.
    pub fn set(&mut self, name: &str, value: f64) -> Result<ParameterScope, GeometryError> {
        let (canonical, scope) = parameter(name).ok_or_else(|| unknown(name))?;
        let f = &mut self.field;
        let m = &mut self.drift.mobility;
        match canonical {
            "xtal_radius" => f.geometry.radius = value,
            "xtal_length" => f.geometry.length = value,
            "pc_radius" => f.geometry.pc_radius = value,
            "pc_length" => f.geometry.pc_length = value,
            "wrap_around_radius" => f.geometry.wrap_around_radius = value,
            "taper_length" => f.geometry.taper_length = value,
            "top_bullet_radius" => f.geometry.top_bullet_radius = value,
            "li_thickness" => f.geometry.li_thickness = value,
            "impurity_z0" => f.impurity.z0 = value,
            "impurity_gradient" => f.impurity.gradient = value,
            "impurity_quadratic" => f.impurity.quadratic = value,
            "impurity_radial_add" => f.impurity.radial_add = value,
            "impurity_radial_mult" => f.impurity.radial_mult = value,
            "impurity_rpower" => f.impurity.radial_power = value,
            "xtal_hv" => f.bias_voltage = value,
            "xtal_grid" => f.solver.grid_spacing = value,
            "max_iterations" => f.solver.max_iterations = count(canonical, value)? as u32,
            "solver_tolerance" => f.solver.tolerance = value,
            "xtal_temp" => m.temperature = value,
            "preamp_tau" => self.response.rise_tau = value,
            "decay_tau" => self.response.decay_tau = optional(value),
            "time_steps_calc" => self.timing.time_steps_calc = count(canonical, value)?,
            "step_time_calc" => self.timing.step_time_calc = value,
            "step_time_out" => self.timing.step_time_out = value,
            "trap_constant" => self.timing.trap_constant = optional(value),
            "stall_steps" => self.drift.limits.stall_steps = count(canonical, value)?,
            "min_displacement" => self.drift.limits.min_displacement = value,
            "h_mu0" => m.holes.mu0 = value,
            "h_beta" => m.holes.beta = value,
            "h_e0" => m.holes.e0 = value,
            "e_mu0" => m.electrons.mu0 = value,
            "e_beta" => m.electrons.beta = value,
            "e_e0" => m.electrons.e0 = value,
            _ => return Err(unknown(name)),
        }
        Ok(scope)
    }
}

// ── ParameterUpdate ────────────────────────────────────────────────

/// A set of named parameter changes applied atomically by
/// `Detector::update_parameters`.
///
/// Later values for the same name replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterUpdate {
    values: IndexMap<String, f64>,
}

impl ParameterUpdate {
    /// An empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    pub fn set(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Set the outer-contact bias (V).
    pub fn bias_voltage(self, volts: f64) -> Self {
        self.set("xtal_hv", volts)
    }

    /// Set the crystal temperature (K).
    pub fn temperature(self, kelvin: f64) -> Self {
        self.set("xtal_temp", kelvin)
    }

    /// Set the preamplifier rise time constant (ns).
    pub fn preamp_tau(self, ns: f64) -> Self {
        self.set("preamp_tau", ns)
    }

    /// Number of parameters in the update.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Apply to a copy of `config`, validate, and report whether any
    /// field-scope parameter changed.
    pub fn apply(&self, config: &DetectorConfig) -> Result<(DetectorConfig, bool), GeometryError> {
        let mut next = config.clone();
        for (name, value) in self.iter() {
            next.set(name, value)?;
        }
        next.validate()?;
        let field_changed = next.field != config.field;
        Ok((next, field_changed))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ParameterUpdate {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_config_is_valid() {
        assert!(DetectorConfig::default().validate().is_ok());
    }

    #[test]
    fn every_parameter_round_trips_through_names() {
        let config = DetectorConfig::default();
        let named = config.to_named();
        assert_eq!(named.len(), PARAMETERS.len());
        let rebuilt = DetectorConfig::from_named(named.iter().map(|(k, v)| (*k, *v))).unwrap();
        assert_eq!(rebuilt, config);
    }

    #[test]
    fn export_order_is_canonical() {
        let named = DetectorConfig::default().to_named();
        let keys: Vec<&str> = named.keys().copied().collect();
        let expected: Vec<&str> = PARAMETERS.iter().map(|(n, _)| *n).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn from_named_overrides_defaults() {
        let c = DetectorConfig::from_named([("xtal_hv", 3000.0), ("decay_tau", 50_000.0)]).unwrap();
        assert_eq!(c.field.bias_voltage, 3000.0);
        assert_eq!(c.response.decay_tau, Some(50_000.0));
        assert_eq!(c.field.geometry.radius, 30.0);
    }

    #[test]
    fn from_named_rejects_unknown_and_invalid() {
        let err = DetectorConfig::from_named([("no_such_thing", 1.0)]).unwrap_err();
        assert!(err.reason.contains("no_such_thing"));
        let err = DetectorConfig::from_named([("pc_radius", 35.0)]).unwrap_err();
        assert_eq!(err.parameter, "pc_radius");
        let err = DetectorConfig::from_named([("time_steps_calc", 10.5)]).unwrap_err();
        assert_eq!(err.parameter, "time_steps_calc");
    }

    #[test]
    fn update_reports_field_changes() {
        let base = DetectorConfig::default();
        let (next, field) = ParameterUpdate::new().bias_voltage(2500.0).apply(&base).unwrap();
        assert!(field);
        assert_eq!(next.field.bias_voltage, 2500.0);

        let (next, field) = ParameterUpdate::new()
            .temperature(90.0)
            .preamp_tau(30.0)
            .apply(&base)
            .unwrap();
        assert!(!field);
        assert_eq!(next.drift.mobility.temperature, 90.0);

        // Setting a field parameter to its current value changes nothing.
        let (_, field) = ParameterUpdate::new().bias_voltage(2000.0).apply(&base).unwrap();
        assert!(!field);
    }

    #[test]
    fn scope_table_matches_names() {
        for &(name, _) in PARAMETERS {
            assert!(DetectorConfig::default().get(name).is_some(), "{name}");
        }
        assert_eq!(parameter("xtal_hv"), Some(("xtal_hv", ParameterScope::Field)));
        assert_eq!(parameter("xtal_temp"), Some(("xtal_temp", ParameterScope::Signal)));
        assert_eq!(parameter("bogus"), None);
    }

    proptest! {
        #[test]
        fn valid_bias_is_accepted(hv in 100.0f64..10_000.0) {
            let c = DetectorConfig::from_named([("xtal_hv", hv)]).unwrap();
            prop_assert_eq!(c.get("xtal_hv"), Some(hv));
        }

        #[test]
        fn out_of_range_temperature_is_rejected(t in 121.0f64..400.0) {
            let err = DetectorConfig::from_named([("xtal_temp", t)]).unwrap_err();
            prop_assert_eq!(err.parameter, "xtal_temp");
        }
    }
}
