//! Config Validation Tests
//!
//! Exercises the config layer independently from the rest of the pipeline:
//! load order semantics, table overlays, unknown-key warnings, and the hard
//! structural errors.

use fcc_advisor::config::validation::validate;
use fcc_advisor::config::{AdvisorConfig, ConfigError};
use fcc_advisor::types::{NUM_FEATURES, TARGET_ORDER};

#[test]
fn builtin_defaults_are_a_complete_config() {
    let config = AdvisorConfig::default();

    assert_eq!(config.defaults.len(), NUM_FEATURES);
    assert_eq!(config.limits.len(), 9);
    assert_eq!(config.blend.secondary_overrides.len(), 2);
    assert_eq!(config.blend.corrections.len(), 1);
    assert!(validate(&config).unwrap().is_empty());
}

#[test]
fn full_config_file_parses_clean() {
    let toml_str = r#"
[unit]
name = "FCC-2"
refinery = "Coastal Refining"

[models]
primary = "artifacts/rf.json"
secondary = "artifacts/gb.json"

[blend]
secondary_overrides = ["co2_emission_tph", "lpg_propylene_wt_pct"]

[blend.corrections]
gasoline_yield_wt_pct = 0.965

[economics]
gasoline_weight = 1.25
lpg_weight = 1.0
propylene_weight = 1.55
co2_epsilon = 1e-8

[limits.gasoline_yield_wt_pct]
min = 36.0
max = 54.0

[defaults]
feed_mass_flow_tph = 415.0
reaction_temp_c = 498.0
"#;
    let config = AdvisorConfig::from_toml_str(toml_str).unwrap();

    assert_eq!(config.unit.name, "FCC-2");
    assert_eq!(config.models.primary.to_str(), Some("artifacts/rf.json"));
    assert_eq!(config.economics.propylene_weight, 1.55);
    assert_eq!(config.defaults["feed_mass_flow_tph"], 415.0);
    // overlay keeps the untouched built-in entries
    assert_eq!(config.defaults.len(), NUM_FEATURES);
    assert_eq!(config.limits.len(), 9);
}

#[test]
fn unknown_keys_warn_without_failing() {
    let mut config = AdvisorConfig::default();
    config
        .blend
        .secondary_overrides
        .push("slurry_yield_wt_pct".to_string());
    config.defaults.insert("riser_velocity_ms".to_string(), 12.0);

    let warnings = validate(&config).unwrap();
    assert_eq!(warnings.len(), 2);
    assert!(warnings
        .iter()
        .any(|w| w.field == "blend.secondary_overrides.slurry_yield_wt_pct"));
    assert!(warnings.iter().any(|w| w.field == "defaults.riser_velocity_ms"));
}

#[test]
fn inverted_limit_is_a_hard_error() {
    let toml_str = r#"
[limits.diesel_t95_c]
min = 360.0
max = 300.0
"#;
    let err = AdvisorConfig::from_toml_str(toml_str).unwrap_err();
    assert!(matches!(err, ConfigError::InvertedRange { .. }));
}

#[test]
fn negative_correction_factor_is_a_hard_error() {
    let toml_str = r#"
[blend.corrections]
gasoline_yield_wt_pct = -0.5
"#;
    let err = AdvisorConfig::from_toml_str(toml_str).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCorrection { .. }));
}

#[test]
fn zero_epsilon_is_a_hard_error() {
    let toml_str = r#"
[economics]
co2_epsilon = 0.0
"#;
    let err = AdvisorConfig::from_toml_str(toml_str).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEpsilon(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = AdvisorConfig::from_toml_str("[models\nprimary = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn every_builtin_limit_names_a_known_target() {
    let config = AdvisorConfig::default();
    for key in config.limits.keys() {
        assert!(
            TARGET_ORDER.contains(&key.as_str()),
            "limit for unknown target {key}"
        );
    }
}
