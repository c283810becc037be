//! Range validation: project blended predictions onto the configured limits.
//!
//! Purely a projection - no side effects, no mutation. Targets without a
//! configured interval (flue-gas CO2 by default) are never reported.

use crate::config::TargetRange;
use crate::types::{BlendedPrediction, RangeViolation, TARGET_ORDER};
use std::collections::BTreeMap;

/// Resolved limit table, held in canonical target order so violation
/// reports come out in a stable, display-ready order.
#[derive(Debug, Clone)]
pub struct RangeSpec {
    ranges: Vec<(usize, TargetRange)>,
}

impl RangeSpec {
    /// Resolve a `[limits]` map against the canonical target order.
    /// Unknown keys were warned about at config load and are dropped here.
    pub fn from_limits(limits: &BTreeMap<String, TargetRange>) -> Self {
        let mut ranges = Vec::with_capacity(limits.len());
        for (idx, key) in TARGET_ORDER.iter().enumerate() {
            if let Some(range) = limits.get(*key) {
                ranges.push((idx, *range));
            }
        }
        Self { ranges }
    }

    /// Number of constrained targets.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Checks blended predictions against the limit table.
#[derive(Debug)]
pub struct RangeValidator {
    spec: RangeSpec,
}

impl RangeValidator {
    pub fn new(spec: RangeSpec) -> Self {
        Self { spec }
    }

    /// Violation records for every constrained target whose value falls
    /// strictly outside its closed interval. Endpoint values are in range.
    /// An empty result is the explicit all-in-range success state.
    pub fn check(&self, blended: &BlendedPrediction) -> Vec<RangeViolation> {
        let mut violations = Vec::new();
        for &(idx, range) in &self.spec.ranges {
            let value = blended.value_at(idx);
            if !range.contains(value) {
                violations.push(RangeViolation {
                    target: TARGET_ORDER[idx].to_string(),
                    value,
                    min: range.min,
                    max: range.max.is_finite().then_some(range.max),
                });
            }
        }
        violations
    }
}
