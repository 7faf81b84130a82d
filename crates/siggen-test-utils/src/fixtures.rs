//! Standard detector configurations for tests and benches.
//!
//! - [`reference_config`]: the default 60 mm x 50 mm crystal at 2 kV on a
//!   1 mm grid, fast enough for debug-build tests.
//! - [`small_config`]: a 20 mm x 10 mm crystal with a short signal window.
//! - [`centre_site`]: a 1 MeV point deposition at the crystal centre.

use siggen_core::InteractionSite;
use siggen_detector::DetectorConfig;

pub fn reference_config() -> DetectorConfig {
    DetectorConfig::from_named([("xtal_grid", 1.0)])
        .unwrap_or_else(|e| panic!("reference config rejected: {e}"))
}

pub fn small_config() -> DetectorConfig {
    DetectorConfig::from_named([
        ("xtal_radius", 10.0),
        ("xtal_length", 10.0),
        ("pc_radius", 1.0),
        ("pc_length", 1.0),
        ("wrap_around_radius", 5.0),
        ("xtal_hv", 1000.0),
        ("xtal_grid", 1.0),
        ("time_steps_calc", 1000.0),
    ])
    .unwrap_or_else(|e| panic!("small config rejected: {e}"))
}

pub fn centre_site() -> InteractionSite {
    InteractionSite::new(0.0, 0.0, 25.0, 1000.0)
}
