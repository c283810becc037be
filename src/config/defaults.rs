//! Built-in configuration tables.
//!
//! Literal values carried over from the unit's historical operating
//! baselines. Every table here is the fallback for the matching
//! `advisor.toml` section; user entries are overlaid on top.

use std::collections::BTreeMap;

use crate::types::{features, targets};

use super::TargetRange;

// ============================================================================
// Model Artifacts
// ============================================================================

/// Default path of the primary (random-forest) regressor artifact.
pub const PRIMARY_MODEL_PATH: &str = "models/primary_rf.json";

/// Default path of the secondary (gradient-boosting) regressor artifact.
pub const SECONDARY_MODEL_PATH: &str = "models/secondary_gb.json";

// ============================================================================
// Blend Policy
// ============================================================================

/// Targets taken from the secondary model instead of the primary.
///
/// The secondary regressor is empirically better on these two targets.
pub const SECONDARY_OVERRIDE_TARGETS: [&str; 2] =
    [targets::CO2_EMISSION, targets::LPG_PROPYLENE];

/// Calibration bias adjustment applied to the blended gasoline yield.
pub const GASOLINE_YIELD_CORRECTION: f64 = 0.965;

// ============================================================================
// Economics
// ============================================================================

/// Relative value weight of the gasoline stream.
pub const GASOLINE_VALUE_WEIGHT: f64 = 1.2;

/// Relative value weight of the LPG stream (net of propylene).
pub const LPG_VALUE_WEIGHT: f64 = 1.0;

/// Relative value weight of the propylene fraction.
pub const PROPYLENE_VALUE_WEIGHT: f64 = 1.5;

/// Additive guard in the value / CO2 ratio denominator.
///
/// Exists solely to avoid division by exact zero; must stay positive.
pub const CO2_EPSILON: f64 = 1e-8;

// ============================================================================
// Input Defaults
// ============================================================================

/// Default operator inputs, `(feature key, value)`.
pub const FEATURE_DEFAULTS: [(&str, f64); 19] = [
    (features::FEED_MASS_FLOW, 420.0),
    (features::FEED_AROMATICS, 31.98),
    (features::FEED_NICKEL, 0.75),
    (features::FEED_VANADIUM, 0.35),
    (features::FEED_CARBON_RESIDUE, 0.59),
    (features::FEED_PREHEAT_TEMP, 219.96),
    (features::REACTION_PRESSURE, 0.44),
    (features::REACTION_TEMP, 495.3),
    (features::CAT_MICROACTIVITY, 45.46),
    (features::FRESH_CAT_ACTIVITY, 61.53),
    (features::REACTOR_CAT_INVENTORY, 2017.42),
    (features::REGEN_BED_TEMP, 674.57),
    (features::FEED_SPECIFIC_GRAVITY, 0.88),
    (features::FEED_NITROGEN, 0.07),
    (features::FEED_SULFUR, 0.37),
    (features::CAT_MAKEUP_RATE, 4.43),
    (features::LIFT_STEAM, 5.16),
    (features::ATOMIZING_STEAM, 16.06),
    (features::STRIPPING_STEAM, 4.96),
];

// ============================================================================
// Target Limits
// ============================================================================

/// Acceptable intervals, `(target key, min, max)`.
///
/// `f64::INFINITY` marks a minimum-only constraint. Flue-gas CO2 emission
/// deliberately has no interval - it is scored, not constrained.
pub const TARGET_RANGES: [(&str, f64, f64); 9] = [
    (targets::GASOLINE_YIELD, 35.0, 55.0),
    (targets::GASOLINE_AROMATICS, 0.0, 33.0),
    (targets::GASOLINE_OLEFINS, 0.0, 25.0),
    (targets::GASOLINE_RON, 92.0, f64::INFINITY),
    (targets::GASOLINE_ENDPOINT, 0.0, 215.0),
    (targets::LPG_YIELD, 15.0, 35.0),
    (targets::LPG_PROPYLENE, 30.0, f64::INFINITY),
    (targets::LPG_C5_RATIO, 0.0, 2.3),
    (targets::DIESEL_T95, 0.0, 360.0),
];

// ============================================================================
// Table Constructors
// ============================================================================

/// Built-in feature default table as a map.
pub fn feature_defaults() -> BTreeMap<String, f64> {
    FEATURE_DEFAULTS
        .iter()
        .map(|&(k, v)| (k.to_string(), v))
        .collect()
}

/// Built-in target limit table as a map.
pub fn target_ranges() -> BTreeMap<String, TargetRange> {
    TARGET_RANGES
        .iter()
        .map(|&(k, min, max)| (k.to_string(), TargetRange { min, max }))
        .collect()
}

/// Built-in secondary-override target list.
pub fn secondary_overrides() -> Vec<String> {
    SECONDARY_OVERRIDE_TARGETS
        .iter()
        .map(|&k| k.to_string())
        .collect()
}

/// Built-in correction factor table.
pub fn corrections() -> BTreeMap<String, f64> {
    BTreeMap::from([(
        targets::GASOLINE_YIELD.to_string(),
        GASOLINE_YIELD_CORRECTION,
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{feature_index, target_index, NUM_FEATURES};

    #[test]
    fn every_feature_has_a_default() {
        assert_eq!(FEATURE_DEFAULTS.len(), NUM_FEATURES);
        for (key, value) in FEATURE_DEFAULTS {
            assert!(feature_index(key).is_some(), "unknown feature {key}");
            assert!(value.is_finite());
        }
    }

    #[test]
    fn range_table_covers_known_targets_only() {
        for (key, min, max) in TARGET_RANGES {
            assert!(target_index(key).is_some(), "unknown target {key}");
            assert!(min <= max);
        }
        // CO2 is scored, never constrained
        assert!(!TARGET_RANGES
            .iter()
            .any(|(k, _, _)| *k == targets::CO2_EMISSION));
    }

    #[test]
    fn blend_tables_reference_known_targets() {
        for key in SECONDARY_OVERRIDE_TARGETS {
            assert!(target_index(key).is_some());
        }
        for key in corrections().keys() {
            assert!(target_index(key).is_some());
        }
    }
}
