//! Shared data structures for the FCC prediction advisory pipeline
//!
//! This module defines the core types flowing through the pipeline:
//! - Canonical feature/target keys and their fixed ordering
//! - `FeatureVector` (validated operator inputs)
//! - `TargetVector` (raw per-model output)
//! - `BlendedPrediction` (final per-target values after blending)
//! - Report types (`PredictionReport`, `RangeViolation`, `ScoreResult`)
//!
//! Ordering is load-bearing: model artifacts are aligned positionally to
//! `FEATURE_ORDER` and `TARGET_ORDER`, and every aligned vector in the
//! pipeline shares that ordering.

mod report;

pub use report::*;

use std::collections::BTreeMap;
use thiserror::Error;

/// Canonical keys for the 19 process input features.
///
/// Units are encoded in the key suffix (`_tph` = tonne/hr, `_wt_pct` = wt%,
/// `_ppmw` = ppm by weight, `_c` = degrees C, `_barg` = bar gauge,
/// `_tpd` = tonne/day).
pub mod features {
    pub const FEED_MASS_FLOW: &str = "feed_mass_flow_tph";
    pub const FEED_AROMATICS: &str = "feed_aromatics_wt_pct";
    pub const FEED_NICKEL: &str = "feed_nickel_ppmw";
    pub const FEED_VANADIUM: &str = "feed_vanadium_ppmw";
    pub const FEED_CARBON_RESIDUE: &str = "feed_carbon_residue_wt_pct";
    pub const FEED_PREHEAT_TEMP: &str = "feed_preheat_temp_c";
    pub const REACTION_PRESSURE: &str = "reaction_pressure_barg";
    pub const REACTION_TEMP: &str = "reaction_temp_c";
    pub const CAT_MICROACTIVITY: &str = "cat_microactivity_pct";
    pub const FRESH_CAT_ACTIVITY: &str = "fresh_cat_activity_wt_pct";
    pub const REACTOR_CAT_INVENTORY: &str = "reactor_cat_inventory_kg";
    pub const REGEN_BED_TEMP: &str = "regen_bed_temp_c";
    pub const FEED_SPECIFIC_GRAVITY: &str = "feed_specific_gravity";
    pub const FEED_NITROGEN: &str = "feed_nitrogen_wt_pct";
    pub const FEED_SULFUR: &str = "feed_sulfur_wt_pct";
    pub const CAT_MAKEUP_RATE: &str = "cat_makeup_rate_tpd";
    pub const LIFT_STEAM: &str = "lift_steam_tph";
    pub const ATOMIZING_STEAM: &str = "atomizing_steam_tph";
    pub const STRIPPING_STEAM: &str = "stripping_steam_tph";
}

/// Canonical keys for the 10 predicted targets.
pub mod targets {
    pub const GASOLINE_YIELD: &str = "gasoline_yield_wt_pct";
    pub const GASOLINE_AROMATICS: &str = "gasoline_aromatics_vol_pct";
    pub const GASOLINE_OLEFINS: &str = "gasoline_olefins_vol_pct";
    pub const GASOLINE_RON: &str = "gasoline_ron";
    pub const GASOLINE_ENDPOINT: &str = "gasoline_endpoint_c";
    pub const LPG_YIELD: &str = "lpg_yield_wt_pct";
    pub const LPG_PROPYLENE: &str = "lpg_propylene_wt_pct";
    pub const LPG_C5_RATIO: &str = "lpg_c5_vol_pct";
    pub const CO2_EMISSION: &str = "co2_emission_tph";
    pub const DIESEL_T95: &str = "diesel_t95_c";
}

/// Number of input features expected by the regression models.
pub const NUM_FEATURES: usize = 19;

/// Number of predicted targets produced by each model.
pub const NUM_TARGETS: usize = 10;

/// Fixed feature ordering. Model artifacts align their input row to this.
pub const FEATURE_ORDER: [&str; NUM_FEATURES] = [
    features::FEED_MASS_FLOW,
    features::FEED_AROMATICS,
    features::FEED_NICKEL,
    features::FEED_VANADIUM,
    features::FEED_CARBON_RESIDUE,
    features::FEED_PREHEAT_TEMP,
    features::REACTION_PRESSURE,
    features::REACTION_TEMP,
    features::CAT_MICROACTIVITY,
    features::FRESH_CAT_ACTIVITY,
    features::REACTOR_CAT_INVENTORY,
    features::REGEN_BED_TEMP,
    features::FEED_SPECIFIC_GRAVITY,
    features::FEED_NITROGEN,
    features::FEED_SULFUR,
    features::CAT_MAKEUP_RATE,
    features::LIFT_STEAM,
    features::ATOMIZING_STEAM,
    features::STRIPPING_STEAM,
];

/// Fixed target ordering. Model artifacts align their output vector to this.
pub const TARGET_ORDER: [&str; NUM_TARGETS] = [
    targets::GASOLINE_YIELD,
    targets::GASOLINE_AROMATICS,
    targets::GASOLINE_OLEFINS,
    targets::GASOLINE_RON,
    targets::GASOLINE_ENDPOINT,
    targets::LPG_YIELD,
    targets::LPG_PROPYLENE,
    targets::LPG_C5_RATIO,
    targets::CO2_EMISSION,
    targets::DIESEL_T95,
];

/// Human-readable feature labels, aligned to `FEATURE_ORDER`.
pub const FEATURE_LABELS: [&str; NUM_FEATURES] = [
    "Feed mass flow (t/h)",
    "Feed aromatics content (wt%)",
    "Feed nickel content (ppmw)",
    "Feed vanadium content (ppmw)",
    "Feed carbon residue (wt%)",
    "Feed preheat temperature (C)",
    "Reaction pressure (bar g)",
    "Reaction temperature (C)",
    "Catalyst micro-activity (%)",
    "Fresh catalyst activity (wt%)",
    "Reactor dense-phase catalyst inventory (kg)",
    "Regenerator bed temperature (C)",
    "Feed specific gravity (g/cm3)",
    "Feed nitrogen content (wt%)",
    "Feed sulfur content (wt%)",
    "Catalyst makeup rate (tonne/d)",
    "Lift steam injection (tonne/hr)",
    "Atomizing steam injection (tonne/hr)",
    "Stripping steam injection (tonne/hr)",
];

/// Human-readable target labels, aligned to `TARGET_ORDER`.
pub const TARGET_LABELS: [&str; NUM_TARGETS] = [
    "Gasoline yield (wt%)",
    "Gasoline aromatics content (vol%)",
    "Gasoline olefins content (vol%)",
    "Gasoline RON",
    "Gasoline endpoint (C)",
    "LPG yield (wt%)",
    "LPG propylene content (wt%)",
    "LPG C5 volume ratio (vol%)",
    "Flue-gas CO2 emission (t/h)",
    "Diesel ASTM D86 95% point (C)",
];

/// Fixed positions of the keys the pipeline addresses directly. Checked
/// against the order arrays by a unit test below.
pub mod positions {
    /// Feed mass flow in `FEATURE_ORDER` (the value scorer's mass basis).
    pub const FEED_MASS_FLOW: usize = 0;

    /// Gasoline yield in `TARGET_ORDER`.
    pub const GASOLINE_YIELD: usize = 0;
    /// LPG yield in `TARGET_ORDER`.
    pub const LPG_YIELD: usize = 5;
    /// LPG propylene content in `TARGET_ORDER`.
    pub const LPG_PROPYLENE: usize = 6;
    /// Flue-gas CO2 emission in `TARGET_ORDER`.
    pub const CO2_EMISSION: usize = 8;
}

/// Position of a feature key in `FEATURE_ORDER`, if it is a known feature.
pub fn feature_index(key: &str) -> Option<usize> {
    FEATURE_ORDER.iter().position(|&k| k == key)
}

/// Position of a target key in `TARGET_ORDER`, if it is a known target.
pub fn target_index(key: &str) -> Option<usize> {
    TARGET_ORDER.iter().position(|&k| k == key)
}

/// Display label for a feature key (falls back to the key itself).
pub fn feature_label(key: &str) -> &str {
    feature_index(key).map_or(key, |i| FEATURE_LABELS[i])
}

/// Display label for a target key (falls back to the key itself).
pub fn target_label(key: &str) -> &str {
    target_index(key).map_or(key, |i| TARGET_LABELS[i])
}

// ============================================================================
// Input Errors
// ============================================================================

/// A malformed prediction request. The pipeline does not run when the
/// feature set fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("missing feature '{0}'")]
    MissingFeature(String),

    #[error("feature '{feature}' is not a finite number (got {value})")]
    NonFinite { feature: String, value: f64 },

    #[error("unknown feature '{0}'")]
    UnknownFeature(String),
}

// ============================================================================
// Feature Vector
// ============================================================================

/// A complete, validated set of the 19 process input values.
///
/// Built once per prediction request and immutable afterwards. Values are
/// numerically unconstrained beyond finiteness - the system performs no
/// plausibility checks on operator inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// Values aligned to `FEATURE_ORDER`.
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build a feature vector from a name -> value map.
    ///
    /// Every key in `FEATURE_ORDER` must be present and finite; keys outside
    /// the canonical set are rejected rather than silently dropped.
    pub fn from_values(values: &BTreeMap<String, f64>) -> Result<Self, InputError> {
        for key in values.keys() {
            if feature_index(key).is_none() {
                return Err(InputError::UnknownFeature(key.clone()));
            }
        }

        let mut row = Vec::with_capacity(NUM_FEATURES);
        for key in FEATURE_ORDER {
            let value = *values
                .get(key)
                .ok_or_else(|| InputError::MissingFeature(key.to_string()))?;
            if !value.is_finite() {
                return Err(InputError::NonFinite {
                    feature: key.to_string(),
                    value,
                });
            }
            row.push(value);
        }

        Ok(Self { values: row })
    }

    /// Value for a canonical feature key.
    pub fn get(&self, key: &str) -> Option<f64> {
        feature_index(key).map(|i| self.values[i])
    }

    /// The ordered input row, aligned to `FEATURE_ORDER`.
    pub fn as_row(&self) -> &[f64] {
        &self.values
    }
}

// ============================================================================
// Target Vector
// ============================================================================

/// One model's raw output, aligned positionally to `TARGET_ORDER`.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetVector {
    values: Vec<f64>,
}

impl TargetVector {
    /// Wrap a raw output vector. Returns `None` unless it has exactly
    /// `NUM_TARGETS` elements.
    pub fn new(values: Vec<f64>) -> Option<Self> {
        if values.len() == NUM_TARGETS {
            Some(Self { values })
        } else {
            None
        }
    }

    /// Wrap a vector already known to be aligned (validated artifacts
    /// always produce exactly `NUM_TARGETS` outputs).
    pub(crate) fn from_aligned(values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), NUM_TARGETS);
        Self { values }
    }

    /// Value at a target position.
    pub fn value_at(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Value for a canonical target key.
    pub fn get(&self, key: &str) -> Option<f64> {
        target_index(key).map(|i| self.values[i])
    }

    /// The ordered output values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

// ============================================================================
// Blended Prediction
// ============================================================================

/// Final per-target values after blending the two model outputs.
///
/// Always contains exactly the `TARGET_ORDER` keys - blending never produces
/// partial results.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendedPrediction {
    values: Vec<f64>,
}

impl BlendedPrediction {
    /// Wrap an already-aligned value vector. Returns `None` unless it has
    /// exactly `NUM_TARGETS` elements.
    pub fn new(values: Vec<f64>) -> Option<Self> {
        if values.len() == NUM_TARGETS {
            Some(Self { values })
        } else {
            None
        }
    }

    /// Wrap a vector the blender has already aligned.
    pub(crate) fn from_aligned(values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), NUM_TARGETS);
        Self { values }
    }

    /// Value for a canonical target key.
    pub fn get(&self, key: &str) -> Option<f64> {
        target_index(key).map(|i| self.values[i])
    }

    /// Value at a target position.
    pub fn value_at(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Iterate `(key, value)` pairs in `TARGET_ORDER`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        TARGET_ORDER.iter().copied().zip(self.values.iter().copied())
    }
}
