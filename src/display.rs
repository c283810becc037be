//! Terminal rendering of prediction reports.
//!
//! Pure string builders over the report types - the structured report is
//! the real output surface, this module only formats it. Values are rounded
//! here and nowhere else: predictions at 3 decimals, economics at 2, the
//! optimum ratio at 4.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::types::{feature_label, target_label, PredictionReport, FEATURE_ORDER};

/// Width of the label column in rendered tables.
const LABEL_WIDTH: usize = 46;

/// Render a complete report: predictions, range warnings, economics.
pub fn render_report(report: &PredictionReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Predicted product quality");
    let _ = writeln!(out, "-------------------------");
    for pred in &report.predictions {
        let _ = writeln!(
            out,
            "  {:<width$} {:>10.3}",
            target_label(&pred.target),
            pred.value,
            width = LABEL_WIDTH
        );
    }
    let _ = writeln!(out);

    if report.all_in_range() {
        let _ = writeln!(out, "All predictions within configured limits.");
    } else {
        let _ = writeln!(out, "Predictions outside configured limits:");
        for v in &report.violations {
            let max = v
                .max
                .map_or_else(|| "+inf".to_string(), |m| format!("{m}"));
            let _ = writeln!(
                out,
                "  {}: predicted {:.3}, range [{}, {}]",
                target_label(&v.target),
                v.value,
                v.min,
                max
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Economics");
    let _ = writeln!(out, "---------");
    let _ = writeln!(
        out,
        "  {:<width$} {:>10.2}",
        "Product value",
        report.score.product_value,
        width = LABEL_WIDTH
    );
    let _ = writeln!(
        out,
        "  {:<width$} {:>10.2}",
        "Flue-gas CO2 emission (t/h)",
        report.score.co2_emission,
        width = LABEL_WIDTH
    );
    let _ = writeln!(
        out,
        "  {:<width$} {:>10.4}",
        "Optimum value",
        report.score.optimum_ratio,
        width = LABEL_WIDTH
    );

    out
}

/// Render the feature table with current values, in canonical order.
pub fn render_feature_table(values: &BTreeMap<String, f64>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Process inputs");
    let _ = writeln!(out, "--------------");
    for key in FEATURE_ORDER {
        let _ = match values.get(key) {
            Some(value) => writeln!(
                out,
                "  {:<width$} {:>10.3}   ({key})",
                feature_label(key),
                value,
                width = LABEL_WIDTH
            ),
            None => writeln!(
                out,
                "  {:<width$} {:>10}   ({key})",
                feature_label(key),
                "-",
                width = LABEL_WIDTH
            ),
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PredictedTarget, RangeViolation, ScoreResult};
    use chrono::Utc;

    fn sample_report(violations: Vec<RangeViolation>) -> PredictionReport {
        PredictionReport {
            generated_at: Utc::now(),
            predictions: vec![PredictedTarget {
                target: "gasoline_yield_wt_pct".to_string(),
                value: 44.3904,
            }],
            violations,
            score: ScoreResult {
                product_value: 298.2,
                co2_emission: 5.0,
                optimum_ratio: 59.639_999,
            },
        }
    }

    #[test]
    fn clean_report_shows_success_line() {
        let text = render_report(&sample_report(Vec::new()));
        assert!(text.contains("Gasoline yield (wt%)"));
        assert!(text.contains("44.390"));
        assert!(text.contains("All predictions within configured limits."));
        assert!(text.contains("298.20"));
        assert!(text.contains("59.6400"));
    }

    #[test]
    fn violations_render_with_bounds() {
        let text = render_report(&sample_report(vec![
            RangeViolation {
                target: "gasoline_ron".to_string(),
                value: 90.1234,
                min: 92.0,
                max: None,
            },
            RangeViolation {
                target: "lpg_yield_wt_pct".to_string(),
                value: 40.0,
                min: 15.0,
                max: Some(35.0),
            },
        ]));
        assert!(text.contains("Predictions outside configured limits:"));
        assert!(text.contains("Gasoline RON: predicted 90.123, range [92, +inf]"));
        assert!(text.contains("range [15, 35]"));
    }

    #[test]
    fn feature_table_lists_all_features_in_order() {
        let values = crate::config::defaults::feature_defaults();
        let text = render_feature_table(&values);
        assert!(text.contains("Feed mass flow (t/h)"));
        assert!(text.contains("420.000"));
        // first data row is the mass flow
        let first_row = text.lines().nth(2).unwrap();
        assert!(first_row.contains("feed_mass_flow_tph"));
    }
}
