//! Aggregation strategies.
//!
//! Exactly one result passes through unchanged. Multiple results are
//! combined by the strategy the intent selects; `synthesize` and
//! `compare` are documented aliases of `merge` until a real cross-domain
//! algorithm is specified.

use std::collections::HashMap;
use switchboard_core::{
    AggregationStrategy, Domain, Intent, SupportingPayload, UnifiedResult,
};

/// Pick a strategy from the intent's operation.
pub fn select_strategy(intent: &Intent) -> AggregationStrategy {
    if intent.operation.contains("analyze") {
        AggregationStrategy::Synthesize
    } else if intent.operation.contains("compare") {
        AggregationStrategy::Compare
    } else {
        AggregationStrategy::Merge
    }
}

/// Combine unified results under a strategy.
///
/// Returns `None` only for an empty input. A single result is returned
/// unchanged regardless of strategy.
pub fn aggregate(
    mut results: Vec<UnifiedResult>,
    strategy: AggregationStrategy,
    weights: Option<&HashMap<Domain, f32>>,
) -> Option<UnifiedResult> {
    if results.is_empty() {
        return None;
    }
    if results.len() == 1 {
        return Some(results.remove(0));
    }
    match strategy {
        AggregationStrategy::Merge
        | AggregationStrategy::Synthesize
        | AggregationStrategy::Compare => Some(merge(results)),
        AggregationStrategy::Prioritize => Some(prioritize(results, weights)),
    }
}

/// First result is the base envelope; every other primary payload is
/// appended as a supporting payload. Confidence is the arithmetic mean of
/// all inputs; completeness and freshness are averaged the same way.
fn merge(mut results: Vec<UnifiedResult>) -> UnifiedResult {
    let count = results.len() as f32;
    let confidence = results.iter().map(|r| r.confidence).sum::<f32>() / count;
    let completeness = results.iter().map(|r| r.completeness).sum::<f32>() / count;
    let freshness = results.iter().map(|r| r.freshness).sum::<f32>() / count;

    let mut base = results.remove(0);
    for other in results {
        base.payload.supporting.push(SupportingPayload {
            domain: other.domain,
            value: other.payload.primary,
        });
        base.payload.supporting.extend(other.payload.supporting);
        base.insights.extend(other.insights);
        base.suggested_actions.extend(other.suggested_actions);
        base.follow_ups.extend(other.follow_ups);
        base.errors.extend(other.errors);
        base.warnings.extend(other.warnings);
        base.limitations.extend(other.limitations);
    }

    base.confidence = confidence;
    base.completeness = completeness;
    base.freshness = freshness;
    base
}

/// Highest confidence wins; explicit per-domain weights re-weight the
/// comparison. Ties keep the earlier result.
fn prioritize(results: Vec<UnifiedResult>, weights: Option<&HashMap<Domain, f32>>) -> UnifiedResult {
    let weight = |domain: Domain| -> f32 {
        weights
            .and_then(|w| w.get(&domain).copied())
            .unwrap_or(1.0)
    };
    results
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.confidence * weight(candidate.domain)
                > best.confidence * weight(best.domain)
            {
                candidate
            } else {
                best
            }
        })
        .expect("non-empty results")
}
