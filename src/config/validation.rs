//! Config validation: unknown-key warnings and structural policy checks.
//!
//! Unknown target/feature keys in the map sections produce non-fatal
//! warnings - they cannot corrupt a run, only fail to take effect, and
//! warnings never break a loadable config. Structurally invalid policy data
//! (an inverted range, a non-finite correction factor, a non-positive
//! epsilon) would corrupt every downstream result and is a hard error.

use thiserror::Error;

use crate::types::{feature_index, target_index};

use super::AdvisorConfig;

/// A fatal configuration problem.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("limit for '{target}' has min {min} greater than max {max}")]
    InvertedRange { target: String, min: f64, max: f64 },

    #[error("limit for '{target}' has a non-finite min ({min})")]
    NonFiniteMin { target: String, min: f64 },

    #[error("correction factor for '{target}' must be a positive finite number (got {factor})")]
    InvalidCorrection { target: String, factor: f64 },

    #[error("economics.{field} must be finite (got {value})")]
    InvalidWeight { field: &'static str, value: f64 },

    #[error("economics.co2_epsilon must be a positive finite number (got {0}); it is the division-by-zero guard")]
    InvalidEpsilon(f64),
}

/// A non-fatal config warning (a key that will not take effect).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Dotted path of the offending entry.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn unknown_target(section: &str, key: &str) -> ValidationWarning {
    ValidationWarning {
        field: format!("{section}.{key}"),
        message: format!("'{key}' is not a known target key; this {section} entry has no effect"),
    }
}

/// Validate a parsed config.
///
/// Returns the warning list on success; the caller decides how to surface
/// them (the loader logs each through `tracing::warn!`).
pub fn validate(config: &AdvisorConfig) -> Result<Vec<ValidationWarning>, ConfigError> {
    let mut warnings = Vec::new();

    // [limits] - structural checks first, then key checks
    for (key, range) in &config.limits {
        if !range.min.is_finite() {
            return Err(ConfigError::NonFiniteMin {
                target: key.clone(),
                min: range.min,
            });
        }
        if range.min > range.max {
            return Err(ConfigError::InvertedRange {
                target: key.clone(),
                min: range.min,
                max: range.max,
            });
        }
        if target_index(key).is_none() {
            warnings.push(unknown_target("limits", key));
        }
    }

    // [blend]
    for key in &config.blend.secondary_overrides {
        if target_index(key).is_none() {
            warnings.push(unknown_target("blend.secondary_overrides", key));
        }
    }
    for (key, factor) in &config.blend.corrections {
        if !factor.is_finite() || *factor <= 0.0 {
            return Err(ConfigError::InvalidCorrection {
                target: key.clone(),
                factor: *factor,
            });
        }
        if target_index(key).is_none() {
            warnings.push(unknown_target("blend.corrections", key));
        }
    }

    // [economics]
    let econ = &config.economics;
    for (field, value) in [
        ("gasoline_weight", econ.gasoline_weight),
        ("lpg_weight", econ.lpg_weight),
        ("propylene_weight", econ.propylene_weight),
    ] {
        if !value.is_finite() {
            return Err(ConfigError::InvalidWeight { field, value });
        }
    }
    if !econ.co2_epsilon.is_finite() || econ.co2_epsilon <= 0.0 {
        return Err(ConfigError::InvalidEpsilon(econ.co2_epsilon));
    }

    // [defaults]
    for key in config.defaults.keys() {
        if feature_index(key).is_none() {
            warnings.push(ValidationWarning {
                field: format!("defaults.{key}"),
                message: format!(
                    "'{key}' is not a known feature key; this defaults entry has no effect"
                ),
            });
        }
    }

    Ok(warnings)
}
