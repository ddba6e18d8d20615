//! Governed action execution tests.

use std::sync::Arc;
use switchboard_actions::ActionOrchestrator;
use switchboard_adapters::AdapterRegistry;
use switchboard_context::Role;
use switchboard_core::{
    Action, ActionKind, Domain, EntityKind, EntityRef, OrchestratorConfig,
};
use switchboard_test_utils::{
    context_with_role, sample_context, ManualClock, MemoryAuditSink, MockAdapter,
};

fn ticket_action() -> Action {
    Action::new(ActionKind::Create, Domain::Tickets, "create_ticket").with_payload(
        serde_json::json!({
            "description": "No heat in unit 4 since Tuesday",
            "customer_id": "c-1001"
        }),
    )
}

struct Harness {
    orchestrator: ActionOrchestrator,
    audit: Arc<MemoryAuditSink>,
    clock: Arc<ManualClock>,
}

fn harness_with(adapter: MockAdapter, audit: Arc<MemoryAuditSink>) -> Harness {
    let registry = Arc::new(AdapterRegistry::new());
    registry.register(Arc::new(adapter));
    let clock = Arc::new(ManualClock::at("2026-08-07T12:00:00Z"));
    let orchestrator = ActionOrchestrator::new(
        registry,
        Arc::clone(&audit) as Arc<dyn switchboard_actions::AuditSink>,
        OrchestratorConfig::default(),
        Arc::clone(&clock) as Arc<dyn switchboard_context::Clock>,
    );
    Harness {
        orchestrator,
        audit,
        clock,
    }
}

fn harness(adapter: MockAdapter) -> Harness {
    harness_with(adapter, Arc::new(MemoryAuditSink::new()))
}

#[tokio::test]
async fn successful_action_records_history_and_audit() {
    let h = harness(
        MockAdapter::new(Domain::Tickets)
            .with_snapshot_state(serde_json::json!({"tickets": 3}))
            .with_affected(vec![EntityRef {
                kind: EntityKind::Customer,
                id: "c-1001".to_string(),
            }]),
    );
    let action = ticket_action();

    let result = h
        .orchestrator
        .execute_action(&action, &sample_context())
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.rollback_available);
    assert_eq!(result.affected.len(), 1);
    assert!(h.orchestrator.execution_history(action.action_id).is_some());
    assert_eq!(h.audit.len(), 1);
    let entry = &h.audit.entries()[0];
    assert_eq!(entry.domain, Domain::Tickets);
    assert_eq!(entry.role, Role::Dispatcher);
    assert!(entry.success);
}

#[tokio::test]
async fn missing_customer_id_fails_with_named_error() {
    let h = harness(MockAdapter::new(Domain::Tickets));
    let action = Action::new(ActionKind::Create, Domain::Tickets, "create_ticket")
        .with_payload(serde_json::json!({"description": "Test ticket description"}));

    let result = h
        .orchestrator
        .execute_action(&action, &sample_context())
        .await
        .unwrap();

    assert!(!result.success);
    assert!(result.error.as_deref().unwrap().contains("Customer ID required"));
    assert!(!result.rollback_available);
    assert!(result.affected.is_empty());
}

#[tokio::test]
async fn low_confidence_action_fails_validation() {
    let h = harness(MockAdapter::new(Domain::Tickets));
    let action = ticket_action().with_confidence(0.3);

    let result = h
        .orchestrator
        .execute_action(&action, &sample_context())
        .await
        .unwrap();
    assert!(!result.success);
    assert!(result.error.as_deref().unwrap().contains("below"));
}

#[tokio::test]
async fn execute_failure_disables_rollback() {
    // Snapshot captured, then execution fails: nothing changed, so the
    // snapshot is discarded and rollback stays off.
    let h = harness(
        MockAdapter::new(Domain::Tickets)
            .with_snapshot_state(serde_json::json!({"tickets": 3}))
            .failing_execute("write rejected"),
    );
    let action = ticket_action();

    let result = h
        .orchestrator
        .execute_action(&action, &sample_context())
        .await
        .unwrap();

    assert!(!result.success);
    assert!(!result.rollback_available);
    assert!(!h.orchestrator.has_rollback_snapshot(action.action_id));
}

#[tokio::test]
async fn action_without_snapshot_has_no_rollback() {
    let h = harness(MockAdapter::new(Domain::Tickets));
    let action = ticket_action();

    let result = h
        .orchestrator
        .execute_action(&action, &sample_context())
        .await
        .unwrap();
    assert!(result.success);
    assert!(!result.rollback_available);

    let err = h
        .orchestrator
        .rollback_action(action.action_id)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Rollback is not available"));
}

#[tokio::test]
async fn rollback_succeeds_once_then_fails_with_named_error() {
    let adapter = MockAdapter::new(Domain::Tickets)
        .with_snapshot_state(serde_json::json!({"status": "open"}));
    let restored = adapter.restored_log();
    let h = harness(adapter);
    let action = ticket_action();

    let result = h
        .orchestrator
        .execute_action(&action, &sample_context())
        .await
        .unwrap();
    assert!(result.rollback_available);

    let rollback = h
        .orchestrator
        .rollback_action(action.action_id)
        .await
        .unwrap();
    assert!(rollback.success);
    assert!(!rollback.rollback_available);
    assert_eq!(restored.lock().unwrap().len(), 1);

    // Second attempt: named error, no second compensating write.
    let err = h
        .orchestrator
        .rollback_action(action.action_id)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already been rolled back"));
    assert_eq!(restored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn rollback_of_unknown_action_fails() {
    let h = harness(MockAdapter::new(Domain::Tickets));
    let err = h
        .orchestrator
        .rollback_action(switchboard_core::new_entity_id())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found in execution history"));
}

#[tokio::test]
async fn expired_snapshot_disables_rollback() {
    let h = harness(
        MockAdapter::new(Domain::Tickets).with_snapshot_state(serde_json::json!({"s": 1})),
    );
    let action = ticket_action();
    h.orchestrator
        .execute_action(&action, &sample_context())
        .await
        .unwrap();

    // Past the rollback TTL, the snapshot is gone for good.
    h.clock.advance(chrono::Duration::seconds(3601));
    let err = h
        .orchestrator
        .rollback_action(action.action_id)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No rollback snapshot retained"));

    // And the history entry now reports rollback unavailable.
    let recorded = h.orchestrator.execution_history(action.action_id).unwrap();
    assert!(!recorded.rollback_available);
}

#[tokio::test]
async fn audit_failure_is_swallowed() {
    let audit = Arc::new(MemoryAuditSink::failing());
    let h = harness_with(
        MockAdapter::new(Domain::Tickets).with_snapshot_state(serde_json::json!({"s": 1})),
        audit,
    );
    let action = ticket_action();

    let result = h
        .orchestrator
        .execute_action(&action, &sample_context())
        .await
        .unwrap();
    assert!(result.success);
}

#[tokio::test]
async fn unauthorized_role_yields_failure_result() {
    let h = harness(MockAdapter::new(Domain::Tickets));
    let action = ticket_action();

    let result = h
        .orchestrator
        .execute_action(&action, &context_with_role(Role::Technician))
        .await
        .unwrap();
    assert!(!result.success);
    assert!(result.error.as_deref().unwrap().contains("not permitted"));
}

#[tokio::test]
async fn missing_adapter_yields_failure_result_not_error() {
    let registry = Arc::new(AdapterRegistry::new());
    let orchestrator = ActionOrchestrator::new(
        registry,
        Arc::new(MemoryAuditSink::new()),
        OrchestratorConfig::default(),
        Arc::new(ManualClock::at("2026-08-07T12:00:00Z")),
    );
    let action = ticket_action();

    let result = orchestrator
        .execute_action(&action, &sample_context())
        .await
        .unwrap();
    assert!(!result.success);
    assert!(result
        .error
        .as_deref()
        .unwrap()
        .contains("No adapter found for domain: tickets"));
}
