//! Confidence normalization.
//!
//! Each domain reports confidence in its own native representation: the
//! customer adapters grade satisfaction A-F, dispatch scores urgency 0-10,
//! payments reports percentages. Aggregation needs one canonical 0.0-1.0
//! scale, which this module produces.

use crate::enums::Domain;
use serde_json::Value;

/// Confidence assigned when a native value is unrecognized.
pub const DEFAULT_CONFIDENCE: f32 = 0.75;

/// Native confidence representation used by a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceScale {
    /// Letter grades A through F
    LetterGrade,
    /// Scores from 0 to 10, mapped linearly
    TenPoint,
    /// Percentages from 0 to 100
    Percent,
    /// Already a 0.0-1.0 float
    Unit,
}

impl ConfidenceScale {
    /// The scale a domain natively reports in.
    pub fn for_domain(domain: Domain) -> Self {
        match domain {
            Domain::Customers => ConfidenceScale::LetterGrade,
            Domain::Dispatch => ConfidenceScale::TenPoint,
            Domain::Payments => ConfidenceScale::Percent,
            Domain::Tickets | Domain::Scheduling | Domain::Search => ConfidenceScale::Unit,
        }
    }
}

/// Convert a domain-native confidence value to the canonical 0.0-1.0 scale.
///
/// Unrecognized values fall back to [`DEFAULT_CONFIDENCE`]. The output is
/// always within [0, 1].
pub fn normalize_confidence(scale: ConfidenceScale, raw: &Value) -> f32 {
    let normalized = match scale {
        ConfidenceScale::LetterGrade => match raw.as_str().map(str::trim) {
            Some(grade) => match grade.to_ascii_uppercase().as_str() {
                "A" => 0.95,
                "B" => 0.80,
                "C" => 0.65,
                "D" => 0.45,
                "E" | "F" => 0.25,
                _ => DEFAULT_CONFIDENCE,
            },
            None => DEFAULT_CONFIDENCE,
        },
        ConfidenceScale::TenPoint => match raw.as_f64() {
            Some(score) if (0.0..=10.0).contains(&score) => (score / 10.0) as f32,
            _ => DEFAULT_CONFIDENCE,
        },
        ConfidenceScale::Percent => match raw.as_f64() {
            Some(pct) if (0.0..=100.0).contains(&pct) => (pct / 100.0) as f32,
            _ => DEFAULT_CONFIDENCE,
        },
        ConfidenceScale::Unit => match raw.as_f64() {
            Some(unit) => unit as f32,
            None => DEFAULT_CONFIDENCE,
        },
    };
    normalized.clamp(0.0, 1.0)
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any input value and scale, the normalized confidence is in [0, 1].
        #[test]
        fn prop_normalized_confidence_in_unit_range(
            value in -1000.0f64..1000.0f64,
            scale_idx in 0usize..4,
        ) {
            let scale = [
                ConfidenceScale::LetterGrade,
                ConfidenceScale::TenPoint,
                ConfidenceScale::Percent,
                ConfidenceScale::Unit,
            ][scale_idx];
            let got = normalize_confidence(scale, &json!(value));
            prop_assert!((0.0..=1.0).contains(&got));
        }

        /// Ten-point scores in range map linearly within tolerance.
        #[test]
        fn prop_ten_point_linear(score in 0.0f64..=10.0f64) {
            let got = normalize_confidence(ConfidenceScale::TenPoint, &json!(score));
            prop_assert!((got as f64 - score / 10.0).abs() < 1e-6);
        }
    }
}
