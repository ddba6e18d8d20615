//! Action orchestrator.
//!
//! Runs the governed sequence for one action: validate, authorize,
//! snapshot rollback state, execute, record. Validation and authorization
//! denials come back as failed results; only the rollback API surfaces
//! named errors.

use crate::audit::{AuditEntry, AuditSink};
use crate::authorize::authorize_action;
use crate::store::RollbackStore;
use crate::validate::validate_action;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use switchboard_adapters::AdapterRegistry;
use switchboard_context::{Clock, ContextSnapshot};
use switchboard_core::{
    Action, ActionError, ActionResult, Domain, EntityId, OrchestratorConfig, RollbackSnapshot,
    SwitchboardResult,
};

struct HistoryEntry {
    result: ActionResult,
    domain: Domain,
    operation: String,
    rolled_back: bool,
}

/// Validates, authorizes, executes, audits, and rolls back actions.
pub struct ActionOrchestrator {
    registry: Arc<AdapterRegistry>,
    store: RollbackStore,
    history: Mutex<HashMap<EntityId, HistoryEntry>>,
    audit: Arc<dyn AuditSink>,
    config: OrchestratorConfig,
    clock: Arc<dyn Clock>,
}

impl ActionOrchestrator {
    pub fn new(
        registry: Arc<AdapterRegistry>,
        audit: Arc<dyn AuditSink>,
        config: OrchestratorConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let store = RollbackStore::new(
            config.rollback_capacity,
            config.rollback_ttl,
            Arc::clone(&clock),
        );
        Self {
            registry,
            store,
            history: Mutex::new(HashMap::new()),
            audit,
            config,
            clock,
        }
    }

    /// Execute one governed action.
    ///
    /// Every outcome is a well-formed [`ActionResult`]; this method only
    /// errs on internal invariant violations, never on user-correctable
    /// denials.
    pub async fn execute_action(
        &self,
        action: &Action,
        context: &ContextSnapshot,
    ) -> SwitchboardResult<ActionResult> {
        let started = Instant::now();

        if let Err(reason) = validate_action(action, context) {
            tracing::info!(action_id = %action.action_id, %reason, "action rejected by validation");
            return Ok(self
                .finish(action, context, ActionResult::failure(action.action_id, reason, elapsed_ms(started)))
                .await);
        }

        if let Err(reason) = authorize_action(action, context, &self.config, self.clock.as_ref()) {
            tracing::info!(action_id = %action.action_id, %reason, "action denied by authorization");
            return Ok(self
                .finish(action, context, ActionResult::failure(action.action_id, reason, elapsed_ms(started)))
                .await);
        }

        let adapter = match self.registry.get(action.domain) {
            Ok(adapter) => adapter,
            Err(err) => {
                return Ok(self
                    .finish(
                        action,
                        context,
                        ActionResult::failure(action.action_id, err.to_string(), elapsed_ms(started)),
                    )
                    .await);
            }
        };

        let snapshot_stored = match adapter.capture_state(action, context).await {
            Ok(Some(state)) => {
                self.store.put(RollbackSnapshot {
                    action_id: action.action_id,
                    domain: action.domain,
                    state,
                    captured_at: self.clock.now(),
                });
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(
                    action_id = %action.action_id,
                    error = %err,
                    "rollback snapshot capture failed; continuing without rollback"
                );
                false
            }
        };

        let result = match adapter.execute(action, context).await {
            Ok(outcome) => ActionResult {
                action_id: action.action_id,
                success: true,
                result: Some(outcome.result),
                error: None,
                duration_ms: elapsed_ms(started),
                affected: outcome.affected,
                rollback_available: snapshot_stored,
            },
            Err(err) => {
                // Nothing changed downstream, so the snapshot has no value.
                self.store.discard(action.action_id);
                ActionResult::failure(action.action_id, err.to_string(), elapsed_ms(started))
            }
        };

        Ok(self.finish(action, context, result).await)
    }

    /// Replay the rollback snapshot for a previously executed action.
    ///
    /// Succeeds at most once per action; repeat attempts fail with
    /// [`ActionError::AlreadyRolledBack`].
    pub async fn rollback_action(&self, action_id: EntityId) -> SwitchboardResult<ActionResult> {
        let started = Instant::now();

        let (domain, operation, affected) = {
            let history = self.history.lock().expect("action history poisoned");
            let entry = history
                .get(&action_id)
                .ok_or(ActionError::UnknownAction { action_id })?;
            if entry.rolled_back {
                return Err(ActionError::AlreadyRolledBack { action_id }.into());
            }
            if !entry.result.rollback_available {
                return Err(ActionError::RollbackUnavailable { action_id }.into());
            }
            (
                entry.domain,
                entry.operation.clone(),
                entry.result.affected.clone(),
            )
        };

        let snapshot = match self.store.take(action_id) {
            Some(snapshot) => snapshot,
            None => {
                // Retention lapsed; rollback is permanently off for this action.
                let mut history = self.history.lock().expect("action history poisoned");
                if let Some(entry) = history.get_mut(&action_id) {
                    entry.result.rollback_available = false;
                }
                return Err(ActionError::SnapshotMissing { action_id }.into());
            }
        };

        let adapter = self.registry.get(domain)?;
        adapter.restore_state(&snapshot).await?;

        let result = {
            let mut history = self.history.lock().expect("action history poisoned");
            let entry = history
                .get_mut(&action_id)
                .ok_or(ActionError::UnknownAction { action_id })?;
            entry.rolled_back = true;
            entry.result.rollback_available = false;
            ActionResult {
                action_id,
                success: true,
                result: Some(serde_json::json!({ "restored": snapshot.state })),
                error: None,
                duration_ms: elapsed_ms(started),
                affected,
                rollback_available: false,
            }
        };

        tracing::info!(%action_id, %domain, %operation, "action rolled back");
        Ok(result)
    }

    /// The recorded result for an action, if one exists.
    pub fn execution_history(&self, action_id: EntityId) -> Option<ActionResult> {
        let history = self.history.lock().expect("action history poisoned");
        history.get(&action_id).map(|entry| entry.result.clone())
    }

    /// Whether a live rollback snapshot is retained for an action.
    pub fn has_rollback_snapshot(&self, action_id: EntityId) -> bool {
        self.store.contains(action_id)
    }

    /// Record the result in the execution history and emit a best-effort
    /// audit entry. Audit failures are logged and swallowed.
    async fn finish(
        &self,
        action: &Action,
        context: &ContextSnapshot,
        result: ActionResult,
    ) -> ActionResult {
        {
            let mut history = self.history.lock().expect("action history poisoned");
            history.insert(
                action.action_id,
                HistoryEntry {
                    result: result.clone(),
                    domain: action.domain,
                    operation: action.operation.clone(),
                    rolled_back: false,
                },
            );
        }

        let entry = AuditEntry {
            action_id: action.action_id,
            user_id: context.user.user_id.clone(),
            domain: action.domain,
            operation: action.operation.clone(),
            success: result.success,
            duration_ms: result.duration_ms,
            affected: result.affected.clone(),
            page: context.app.current_page.clone(),
            role: context.user.role,
            at: self.clock.now(),
        };
        if let Err(err) = self.audit.record(&entry).await {
            tracing::warn!(action_id = %action.action_id, error = %err, "audit write failed");
        }

        result
    }
}

fn elapsed_ms(started: Instant) -> i64 {
    started.elapsed().as_millis() as i64
}
