//! Report types: the stable structured output surface of one pipeline run.
//!
//! Shape is independent of presentation technology - the terminal renderer
//! and the JSON output both consume these structs unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One blended prediction, keyed by canonical target name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedTarget {
    /// Canonical target key (see `types::targets`).
    pub target: String,
    /// Blended predicted value.
    pub value: f64,
}

/// A blended prediction falling strictly outside its configured interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeViolation {
    /// Canonical target key.
    pub target: String,
    /// The offending predicted value.
    pub value: f64,
    /// Lower bound of the acceptable interval.
    pub min: f64,
    /// Upper bound, `None` for minimum-only constraints.
    pub max: Option<f64>,
}

/// Economic summary derived from the blended predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Weighted product value (gasoline + LPG + propylene streams).
    pub product_value: f64,
    /// Predicted flue-gas CO2 emission (t/h).
    pub co2_emission: f64,
    /// Product value per tonne of CO2 emitted.
    pub optimum_ratio: f64,
}

/// Complete output of one prediction cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// All 10 blended predictions, in canonical target order.
    pub predictions: Vec<PredictedTarget>,
    /// Range violations, empty when every constrained target is in range.
    pub violations: Vec<RangeViolation>,
    /// Economic summary.
    pub score: ScoreResult,
}

impl PredictionReport {
    /// Whether every constrained target fell inside its interval.
    ///
    /// An empty violation list is an explicit success state, not the absence
    /// of a check.
    pub fn all_in_range(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_json_shape_is_stable() {
        let report = PredictionReport {
            generated_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
            predictions: vec![PredictedTarget {
                target: "gasoline_yield_wt_pct".to_string(),
                value: 44.5,
            }],
            violations: vec![RangeViolation {
                target: "gasoline_ron".to_string(),
                value: 90.1,
                min: 92.0,
                max: None,
            }],
            score: ScoreResult {
                product_value: 298.2,
                co2_emission: 5.0,
                optimum_ratio: 59.64,
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["predictions"][0]["target"], "gasoline_yield_wt_pct");
        assert_eq!(json["violations"][0]["max"], serde_json::Value::Null);
        assert_eq!(json["score"]["product_value"], 298.2);

        let back: PredictionReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
        assert!(!back.all_in_range());
    }
}
