//! Prediction blending: fold the two model outputs into one result vector.
//!
//! The blend is a fixed two-phase fold over policy data: start from the
//! primary output, overwrite the targets the secondary model is better at,
//! then apply the multiplicative calibration corrections. Corrections run
//! after overrides and apply to whichever value then populates the target,
//! regardless of which model contributed it.

use crate::config::BlendConfig;
use crate::types::{target_index, BlendedPrediction, TargetVector};

/// Resolved (index-based) form of the `[blend]` config section.
///
/// Unknown target keys were already warned about at config load; resolution
/// simply drops them.
#[derive(Debug, Clone)]
pub struct BlendPolicy {
    /// Target positions taken from the secondary model.
    secondary_overrides: Vec<usize>,
    /// `(target position, factor)` corrections, applied after overrides.
    corrections: Vec<(usize, f64)>,
}

impl BlendPolicy {
    /// Resolve a `[blend]` section against the canonical target order.
    pub fn from_config(config: &BlendConfig) -> Self {
        let secondary_overrides = config
            .secondary_overrides
            .iter()
            .filter_map(|key| target_index(key))
            .collect();
        let corrections = config
            .corrections
            .iter()
            .filter_map(|(key, &factor)| target_index(key).map(|i| (i, factor)))
            .collect();
        Self {
            secondary_overrides,
            corrections,
        }
    }
}

impl Default for BlendPolicy {
    fn default() -> Self {
        Self::from_config(&BlendConfig::default())
    }
}

/// Combines two aligned model outputs into one `BlendedPrediction`.
#[derive(Debug)]
pub struct PredictionBlender {
    policy: BlendPolicy,
}

impl PredictionBlender {
    pub fn new(policy: BlendPolicy) -> Self {
        Self { policy }
    }

    /// Produce the final per-target values. Pure, and always complete:
    /// every canonical target key is populated.
    pub fn blend(&self, primary: &TargetVector, secondary: &TargetVector) -> BlendedPrediction {
        let mut values = primary.as_slice().to_vec();

        for &i in &self.policy.secondary_overrides {
            values[i] = secondary.value_at(i);
        }
        for &(i, factor) in &self.policy.corrections {
            values[i] *= factor;
        }

        BlendedPrediction::from_aligned(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::GASOLINE_YIELD_CORRECTION;
    use crate::config::BlendConfig;
    use crate::types::{targets, NUM_TARGETS, TARGET_ORDER};
    use std::collections::BTreeMap;

    fn vector(fill: f64) -> TargetVector {
        TargetVector::new(vec![fill; NUM_TARGETS]).unwrap()
    }

    #[test]
    fn default_policy_overrides_co2_and_propylene_only() {
        let blender = PredictionBlender::new(BlendPolicy::default());
        let primary = vector(10.0);
        let secondary = vector(99.0);

        let blended = blender.blend(&primary, &secondary);

        assert_eq!(blended.get(targets::CO2_EMISSION), Some(99.0));
        assert_eq!(blended.get(targets::LPG_PROPYLENE), Some(99.0));
        for key in TARGET_ORDER {
            if key == targets::CO2_EMISSION || key == targets::LPG_PROPYLENE {
                continue;
            }
            let expected = if key == targets::GASOLINE_YIELD {
                10.0 * GASOLINE_YIELD_CORRECTION
            } else {
                10.0
            };
            assert_eq!(blended.get(key), Some(expected), "target {key}");
        }
    }

    #[test]
    fn gasoline_correction_is_exact() {
        let blender = PredictionBlender::new(BlendPolicy::default());
        let mut primary_values = vec![0.0; NUM_TARGETS];
        primary_values[0] = 47.31;
        let primary = TargetVector::new(primary_values).unwrap();

        let blended = blender.blend(&primary, &vector(0.0));
        let yield_pred = blended.get(targets::GASOLINE_YIELD).unwrap();
        assert!((yield_pred - 47.31 * 0.965).abs() < 1e-9);
    }

    #[test]
    fn correction_applies_to_overridden_value() {
        // If a future policy routes gasoline yield to the secondary model,
        // the correction must follow the overridden value.
        let config = BlendConfig {
            secondary_overrides: vec![targets::GASOLINE_YIELD.to_string()],
            corrections: BTreeMap::from([(targets::GASOLINE_YIELD.to_string(), 0.5)]),
        };
        let blender = PredictionBlender::new(BlendPolicy::from_config(&config));

        let blended = blender.blend(&vector(40.0), &vector(60.0));
        assert_eq!(blended.get(targets::GASOLINE_YIELD), Some(30.0));
    }

    #[test]
    fn empty_policy_is_a_passthrough() {
        let config = BlendConfig {
            secondary_overrides: Vec::new(),
            corrections: BTreeMap::new(),
        };
        let blender = PredictionBlender::new(BlendPolicy::from_config(&config));

        let primary = vector(3.25);
        let blended = blender.blend(&primary, &vector(7.0));
        for (key, value) in blended.iter() {
            assert_eq!(value, 3.25, "target {key}");
        }
    }

    #[test]
    fn unknown_policy_keys_are_dropped() {
        let config = BlendConfig {
            secondary_overrides: vec!["coke_yield_wt_pct".to_string()],
            corrections: BTreeMap::from([("slurry_yield_wt_pct".to_string(), 2.0)]),
        };
        let blender = PredictionBlender::new(BlendPolicy::from_config(&config));

        let blended = blender.blend(&vector(1.0), &vector(2.0));
        for (_, value) in blended.iter() {
            assert_eq!(value, 1.0);
        }
    }
}
