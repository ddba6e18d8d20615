//! Property tests for action validation.

use proptest::prelude::*;
use switchboard_actions::validate::validate_action;
use switchboard_core::{Action, ActionKind, Domain};
use switchboard_test_utils::{generators::arb_domain, sample_context};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ========================================================================
    // Property: confidence below 0.5 always fails validation, regardless
    // of domain, operation, or payload
    // ========================================================================

    #[test]
    fn prop_low_confidence_always_fails(
        confidence in 0.0f32..0.499f32,
        domain in arb_domain(),
        operation in "[a-z_]{1,24}",
        description in "[a-zA-Z0-9 ]{0,64}",
    ) {
        let action = Action::new(ActionKind::Update, domain, operation)
            .with_payload(serde_json::json!({
                "description": description,
                "customer_id": "c-1001",
                "date": "2026-08-10",
                "time": "10:00",
            }))
            .with_confidence(confidence);
        let context = sample_context();
        prop_assert!(validate_action(&action, &context).is_err());
    }

    // ========================================================================
    // Property: validation never panics on arbitrary payload shapes
    // ========================================================================

    #[test]
    fn prop_validation_is_total(
        domain in arb_domain(),
        operation in "[a-z_]{1,24}",
        key in "[a-z_]{1,12}",
        value in "[a-zA-Z0-9 ]{0,32}",
    ) {
        let action = Action::new(ActionKind::Create, domain, operation)
            .with_payload(serde_json::json!({ key: value }));
        let context = sample_context();
        let _ = validate_action(&action, &context);
    }
}
