//! Advisor configuration - model paths, blend policy, economics, target
//! limits, and input defaults as operator-tunable TOML values.
//!
//! Every section implements `Default` with values matching the built-in
//! tables in `defaults`, so an absent file (or an empty one) behaves
//! identically to the shipped configuration. The `[limits]` and `[defaults]`
//! map sections are overlaid on the built-in tables rather than replacing
//! them, so a one-line tweak does not have to restate the whole table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use super::validation::{self, ConfigError};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for an advisor deployment.
///
/// Load with `AdvisorConfig::load()` which searches:
/// 1. `$FCC_ADVISOR_CONFIG` env var
/// 2. `./advisor.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Unit / refinery identification.
    #[serde(default)]
    pub unit: UnitInfo,

    /// Model artifact locations.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Per-target blend policy (override sources and correction factors).
    #[serde(default)]
    pub blend: BlendConfig,

    /// Product value weights and the CO2 ratio guard.
    #[serde(default)]
    pub economics: EconomicsConfig,

    /// Acceptable interval per target key. Overlaid on the built-in table.
    #[serde(default)]
    pub limits: BTreeMap<String, TargetRange>,

    /// Default operator input per feature key. Overlaid on the built-in table.
    #[serde(default)]
    pub defaults: BTreeMap<String, f64>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            unit: UnitInfo::default(),
            models: ModelsConfig::default(),
            blend: BlendConfig::default(),
            economics: EconomicsConfig::default(),
            limits: defaults::target_ranges(),
            defaults: defaults::feature_defaults(),
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Unit identification, used only for logging and report context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitInfo {
    /// Process unit name.
    #[serde(default = "default_unit_name")]
    pub name: String,

    /// Refinery / site name.
    #[serde(default)]
    pub refinery: String,
}

fn default_unit_name() -> String {
    "FCC-1".to_string()
}

impl Default for UnitInfo {
    fn default() -> Self {
        Self {
            name: default_unit_name(),
            refinery: String::new(),
        }
    }
}

/// Locations of the two pre-trained regressor artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Primary regressor (supplies most targets).
    #[serde(default = "default_primary_path")]
    pub primary: PathBuf,

    /// Secondary regressor (supplies the override targets).
    #[serde(default = "default_secondary_path")]
    pub secondary: PathBuf,
}

fn default_primary_path() -> PathBuf {
    PathBuf::from(defaults::PRIMARY_MODEL_PATH)
}

fn default_secondary_path() -> PathBuf {
    PathBuf::from(defaults::SECONDARY_MODEL_PATH)
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            primary: default_primary_path(),
            secondary: default_secondary_path(),
        }
    }
}

/// The per-target blend policy as inspectable data.
///
/// Expressed as configuration rather than inline conditionals so the policy
/// can change without touching blending logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendConfig {
    /// Targets taken from the secondary model's output.
    #[serde(default = "defaults::secondary_overrides")]
    pub secondary_overrides: Vec<String>,

    /// Multiplicative corrections applied after the override step.
    #[serde(default = "defaults::corrections")]
    pub corrections: BTreeMap<String, f64>,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            secondary_overrides: defaults::secondary_overrides(),
            corrections: defaults::corrections(),
        }
    }
}

/// Product value weights and the CO2 ratio denominator guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicsConfig {
    /// Value weight of the gasoline stream.
    #[serde(default = "default_gasoline_weight")]
    pub gasoline_weight: f64,

    /// Value weight of the LPG stream net of propylene.
    #[serde(default = "default_lpg_weight")]
    pub lpg_weight: f64,

    /// Value weight of the propylene fraction.
    #[serde(default = "default_propylene_weight")]
    pub propylene_weight: f64,

    /// Additive epsilon in the value / CO2 denominator. Must stay positive;
    /// it is the structural division-by-zero guard.
    #[serde(default = "default_co2_epsilon")]
    pub co2_epsilon: f64,
}

fn default_gasoline_weight() -> f64 {
    defaults::GASOLINE_VALUE_WEIGHT
}

fn default_lpg_weight() -> f64 {
    defaults::LPG_VALUE_WEIGHT
}

fn default_propylene_weight() -> f64 {
    defaults::PROPYLENE_VALUE_WEIGHT
}

fn default_co2_epsilon() -> f64 {
    defaults::CO2_EPSILON
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            gasoline_weight: default_gasoline_weight(),
            lpg_weight: default_lpg_weight(),
            propylene_weight: default_propylene_weight(),
            co2_epsilon: default_co2_epsilon(),
        }
    }
}

/// Closed acceptable interval for one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    /// Lower bound (inclusive).
    pub min: f64,

    /// Upper bound (inclusive). Defaults to +inf for minimum-only
    /// constraints when omitted from the TOML entry.
    #[serde(default = "unbounded")]
    pub max: f64,
}

fn unbounded() -> f64 {
    f64::INFINITY
}

impl TargetRange {
    /// Whether a value lies inside the closed interval. Endpoint values are
    /// in range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// ============================================================================
// Loading
// ============================================================================

impl AdvisorConfig {
    /// Load configuration using the standard search order:
    /// 1. `$FCC_ADVISOR_CONFIG` environment variable
    /// 2. `./advisor.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that fails to load falls back to the next source with a
    /// warning rather than aborting - a missing config is not an error,
    /// only missing models are.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("FCC_ADVISOR_CONFIG") {
            let p = PathBuf::from(&path);
            match Self::load_from_file(&p) {
                Ok(config) => {
                    info!(path = %p.display(), unit = %config.unit.name, "Loaded advisor config from FCC_ADVISOR_CONFIG");
                    return config;
                }
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "Failed to load config from FCC_ADVISOR_CONFIG, falling back");
                }
            }
        }

        let local = Path::new("advisor.toml");
        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    info!(path = %local.display(), unit = %config.unit.name, "Loaded advisor config");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./advisor.toml, using built-in defaults");
                }
            }
        }

        info!("No advisor config found, using built-in defaults");
        Self::default()
    }

    /// Load and validate a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse a TOML document, overlay the map sections on the built-in
    /// tables, and validate the result.
    ///
    /// Unknown target/feature keys produce `tracing` warnings; structurally
    /// invalid policy data (inverted range, bad correction factor,
    /// non-positive epsilon) is a hard error.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(raw)?;

        // Overlay user map entries on the built-in tables.
        let mut limits = defaults::target_ranges();
        limits.append(&mut config.limits);
        config.limits = limits;

        let mut feature_defaults = defaults::feature_defaults();
        feature_defaults.append(&mut config.defaults);
        config.defaults = feature_defaults;

        for warning in validation::validate(&config)? {
            warn!(field = %warning.field, "{warning}");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{targets, NUM_FEATURES};

    #[test]
    fn empty_file_equals_builtin_defaults() {
        let from_empty = AdvisorConfig::from_toml_str("").unwrap();
        let builtin = AdvisorConfig::default();

        assert_eq!(from_empty.models.primary, builtin.models.primary);
        assert_eq!(
            from_empty.blend.secondary_overrides,
            builtin.blend.secondary_overrides
        );
        assert_eq!(from_empty.limits.len(), 9);
        assert_eq!(from_empty.defaults.len(), NUM_FEATURES);
    }

    #[test]
    fn map_sections_overlay_builtin_tables() {
        let toml_str = r#"
[limits.gasoline_yield_wt_pct]
min = 38.0
max = 52.0

[defaults]
feed_mass_flow_tph = 400.0
"#;
        let config = AdvisorConfig::from_toml_str(toml_str).unwrap();

        let tweaked = config.limits.get(targets::GASOLINE_YIELD).unwrap();
        assert_eq!(tweaked.min, 38.0);
        assert_eq!(tweaked.max, 52.0);
        // untouched entries survive the overlay
        assert_eq!(config.limits.len(), 9);
        assert_eq!(config.defaults["feed_mass_flow_tph"], 400.0);
        assert_eq!(config.defaults.len(), NUM_FEATURES);
    }

    #[test]
    fn omitted_max_means_minimum_only() {
        let toml_str = r#"
[limits.gasoline_ron]
min = 93.0
"#;
        let config = AdvisorConfig::from_toml_str(toml_str).unwrap();
        let range = config.limits.get(targets::GASOLINE_RON).unwrap();
        assert_eq!(range.min, 93.0);
        assert!(range.max.is_infinite());
        assert!(range.contains(250.0));
        assert!(range.contains(93.0));
        assert!(!range.contains(92.99));
    }

    #[test]
    fn blend_policy_round_trips_through_toml() {
        let toml_str = r#"
[blend]
secondary_overrides = ["co2_emission_tph"]

[blend.corrections]
gasoline_yield_wt_pct = 0.95
lpg_yield_wt_pct = 1.01
"#;
        let config = AdvisorConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.blend.secondary_overrides, vec!["co2_emission_tph"]);
        assert_eq!(config.blend.corrections.len(), 2);
        assert_eq!(config.blend.corrections["gasoline_yield_wt_pct"], 0.95);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let toml_str = r#"
[limits.lpg_yield_wt_pct]
min = 40.0
max = 20.0
"#;
        let err = AdvisorConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { .. }));
    }
}
