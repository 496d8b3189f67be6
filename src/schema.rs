//! Canonical feature schema for candidate observations
//!
//! Clients may submit a record positionally or keyed by name; either way the
//! numeric vector handed to the model follows the order defined here.

use serde_json::Value;

/// Recognized feature names, in canonical order.
pub const FEATURE_NAMES: [&str; 13] = [
    "orbital_period",
    "planet_radius",
    "star_temp",
    "star_radius",
    "transit_depth",
    "transit_duration",
    "equilibrium_temp",
    "star_logg",
    "star_mass",
    "star_metallicity",
    "signal_to_noise",
    "insolation_flux",
    "planet_mass_earth",
];

/// Number of observable features every record must resolve to.
pub const REQUIRED_FEATURES: usize = FEATURE_NAMES.len();

/// Coerce a single JSON value to a finite float.
///
/// Accepts numbers, booleans, and strings that parse as floats after
/// trimming. Returns `None` for anything else and for non-finite results.
pub fn coerce_feature(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}
