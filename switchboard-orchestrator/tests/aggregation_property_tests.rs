//! Property tests for aggregation strategies.

use chrono::Utc;
use proptest::prelude::*;
use switchboard_core::{AggregationStrategy, Domain, UnifiedResult};
use switchboard_orchestrator::aggregate;
use switchboard_test_utils::generators::arb_confidences;

fn results_from(confidences: &[f32]) -> Vec<UnifiedResult> {
    confidences
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let domain = Domain::ALL[i % Domain::ALL.len()];
            UnifiedResult::new(domain, "search", serde_json::json!({"i": i}), Utc::now())
                .with_confidence(*c)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ========================================================================
    // Property: merge confidence equals the arithmetic mean of the inputs
    // ========================================================================

    #[test]
    fn prop_merge_confidence_is_mean(confidences in arb_confidences(8)) {
        prop_assume!(confidences.len() >= 2);
        let expected = confidences.iter().sum::<f32>() / confidences.len() as f32;
        let got = aggregate(results_from(&confidences), AggregationStrategy::Merge, None)
            .unwrap();
        prop_assert!((got.confidence - expected).abs() < 1e-5);
    }

    // ========================================================================
    // Property: aggregate confidence never exceeds the max constituent
    // ========================================================================

    #[test]
    fn prop_aggregate_never_exceeds_max(confidences in arb_confidences(8)) {
        let max = confidences.iter().cloned().fold(0.0f32, f32::max);
        for strategy in [
            AggregationStrategy::Merge,
            AggregationStrategy::Prioritize,
            AggregationStrategy::Synthesize,
            AggregationStrategy::Compare,
        ] {
            let got = aggregate(results_from(&confidences), strategy, None).unwrap();
            prop_assert!(got.confidence <= max + 1e-6);
        }
    }

    // ========================================================================
    // Property: a single result is returned unchanged by every strategy
    // ========================================================================

    #[test]
    fn prop_single_result_identity(confidence in 0.0f32..=1.0f32) {
        let input = results_from(&[confidence]).remove(0);
        for strategy in [
            AggregationStrategy::Merge,
            AggregationStrategy::Prioritize,
            AggregationStrategy::Synthesize,
            AggregationStrategy::Compare,
        ] {
            let got = aggregate(vec![input.clone()], strategy, None).unwrap();
            prop_assert_eq!(&got, &input);
        }
    }
}
