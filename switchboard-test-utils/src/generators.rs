//! Proptest generators for Switchboard types.

use proptest::prelude::*;
use switchboard_core::Domain;

/// Any domain.
pub fn arb_domain() -> impl Strategy<Value = Domain> {
    prop::sample::select(Domain::ALL.to_vec())
}

/// A confidence value in [0, 1].
pub fn arb_confidence() -> impl Strategy<Value = f32> {
    (0.0f32..=1.0f32).prop_map(|c| c.clamp(0.0, 1.0))
}

/// A non-empty list of confidences, for aggregation properties.
pub fn arb_confidences(max_len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(arb_confidence(), 1..=max_len)
}
