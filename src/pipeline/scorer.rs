//! Economic scoring: product value, CO2 emission, and the optimum ratio.
//!
//! Yields are wt% of the feed mass flow. Product value weighs the gasoline,
//! net-LPG, and propylene streams; the optimum ratio is value per tonne of
//! CO2 emitted. All arithmetic is plain IEEE double precision - rounding is
//! a display concern, not part of the computed values.

use crate::config::EconomicsConfig;
use crate::types::{positions, BlendedPrediction, ScoreResult};

/// Computes the economic summary for one blended prediction.
#[derive(Debug)]
pub struct ValueScorer {
    economics: EconomicsConfig,
}

impl ValueScorer {
    pub fn new(economics: EconomicsConfig) -> Self {
        Self { economics }
    }

    /// Score one blended prediction against the feed mass flow (t/h).
    ///
    /// The epsilon in the ratio denominator is the structural guard against
    /// a zero CO2 prediction - the division cannot fail.
    pub fn score(&self, blended: &BlendedPrediction, mass_flow: f64) -> ScoreResult {
        let gasoline_yield = blended.value_at(positions::GASOLINE_YIELD) / 100.0;
        let lpg_yield = blended.value_at(positions::LPG_YIELD) / 100.0;
        let propylene_ratio = blended.value_at(positions::LPG_PROPYLENE) / 100.0;

        let gasoline_prod = gasoline_yield * mass_flow;
        let lpg_prod = lpg_yield * mass_flow;
        let propylene_prod = lpg_prod * propylene_ratio;

        let product_value = gasoline_prod * self.economics.gasoline_weight
            + (lpg_prod - propylene_prod) * self.economics.lpg_weight
            + propylene_prod * self.economics.propylene_weight;

        let co2_emission = blended.value_at(positions::CO2_EMISSION);
        let optimum_ratio = product_value / (co2_emission + self.economics.co2_epsilon);

        ScoreResult {
            product_value,
            co2_emission,
            optimum_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NUM_TARGETS;

    fn blended(gasoline: f64, lpg: f64, propylene: f64, co2: f64) -> BlendedPrediction {
        let mut values = vec![0.0; NUM_TARGETS];
        values[positions::GASOLINE_YIELD] = gasoline;
        values[positions::LPG_YIELD] = lpg;
        values[positions::LPG_PROPYLENE] = propylene;
        values[positions::CO2_EMISSION] = co2;
        BlendedPrediction::new(values).unwrap()
    }

    fn scorer() -> ValueScorer {
        ValueScorer::new(EconomicsConfig::default())
    }

    #[test]
    fn worked_example_from_operating_history() {
        // 40% gasoline, 20% LPG, 30% propylene ratio, 420 t/h feed:
        // gasoline 168 t/h, LPG 84 t/h, propylene 25.2 t/h
        // value = 168*1.2 + (84-25.2)*1.0 + 25.2*1.5 = 298.2
        let result = scorer().score(&blended(40.0, 20.0, 30.0, 5.0), 420.0);

        assert!((result.product_value - 298.2).abs() < 1e-9);
        assert_eq!(result.co2_emission, 5.0);
        assert!((result.optimum_ratio - 298.2 / (5.0 + 1e-8)).abs() < 1e-9);
        assert!((result.optimum_ratio - 59.64).abs() < 0.01);
    }

    #[test]
    fn zero_co2_stays_finite() {
        let result = scorer().score(&blended(40.0, 20.0, 30.0, 0.0), 420.0);

        assert!(result.optimum_ratio.is_finite());
        assert!(!result.optimum_ratio.is_nan());
        // guard denominator is exactly the epsilon
        assert!((result.optimum_ratio - 298.2 / 1e-8).abs() < 1.0);
    }

    #[test]
    fn zero_mass_flow_zeroes_the_value() {
        let result = scorer().score(&blended(40.0, 20.0, 30.0, 5.0), 0.0);
        assert_eq!(result.product_value, 0.0);
        assert!((result.optimum_ratio).abs() < 1e-9);
    }

    #[test]
    fn custom_weights_are_honored() {
        let economics = EconomicsConfig {
            gasoline_weight: 2.0,
            lpg_weight: 0.0,
            propylene_weight: 0.0,
            co2_epsilon: 1e-8,
        };
        let result =
            ValueScorer::new(economics).score(&blended(50.0, 20.0, 30.0, 5.0), 100.0);
        // only gasoline counts: 0.5 * 100 * 2.0
        assert!((result.product_value - 100.0).abs() < 1e-9);
    }
}
