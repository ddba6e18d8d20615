//! Scriptable mock domain adapter.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use switchboard_adapters::{ActionOutcome, DomainAdapter};
use switchboard_context::ContextSnapshot;
use switchboard_core::{
    Action, AdapterError, Capability, Domain, DomainQuery, EntityRef, HealthCheck,
    RollbackSnapshot, SwitchboardResult, UnifiedResult,
};

/// A domain adapter whose behavior is scripted by the test.
///
/// Records every query/execute call in an ordered log shared across
/// clones, so tests can assert dispatch ordering.
pub struct MockAdapter {
    domain: Domain,
    capabilities: Vec<Capability>,
    confidence: f32,
    primary: serde_json::Value,
    delay: Option<Duration>,
    fail_query: Option<String>,
    fail_execute: Option<String>,
    fail_health: Option<String>,
    snapshot_state: Option<serde_json::Value>,
    affected: Vec<EntityRef>,
    calls: Arc<Mutex<Vec<String>>>,
    restored: Arc<Mutex<Vec<RollbackSnapshot>>>,
}

impl MockAdapter {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            capabilities: vec![Capability::Query, Capability::Action],
            confidence: 0.8,
            primary: serde_json::json!({"mock": true}),
            delay: None,
            fail_query: None,
            fail_execute: None,
            fail_health: None,
            snapshot_state: None,
            affected: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            restored: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_primary(mut self, primary: serde_json::Value) -> Self {
        self.primary = primary;
        self
    }

    /// Delay each query by the given duration, for ordering tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every query fails with a backend error carrying this reason.
    pub fn failing_queries(mut self, reason: impl Into<String>) -> Self {
        self.fail_query = Some(reason.into());
        self
    }

    /// Every execute fails with a backend error carrying this reason.
    pub fn failing_execute(mut self, reason: impl Into<String>) -> Self {
        self.fail_execute = Some(reason.into());
        self
    }

    /// Every health probe fails with this reason.
    pub fn failing_health(mut self, reason: impl Into<String>) -> Self {
        self.fail_health = Some(reason.into());
        self
    }

    /// State returned by `capture_state`, enabling rollback.
    pub fn with_snapshot_state(mut self, state: serde_json::Value) -> Self {
        self.snapshot_state = Some(state);
        self
    }

    /// Entities reported as affected by executed actions.
    pub fn with_affected(mut self, affected: Vec<EntityRef>) -> Self {
        self.affected = affected;
        self
    }

    /// Shared, ordered log of calls ("query:<domain>:<operation>",
    /// "execute:<domain>:<operation>").
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    /// Share a call log across adapters, for cross-adapter ordering
    /// assertions.
    pub fn with_call_log(mut self, log: Arc<Mutex<Vec<String>>>) -> Self {
        self.calls = log;
        self
    }

    /// Snapshots replayed through `restore_state`.
    pub fn restored_log(&self) -> Arc<Mutex<Vec<RollbackSnapshot>>> {
        Arc::clone(&self.restored)
    }
}

#[async_trait]
impl DomainAdapter for MockAdapter {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    async fn query(
        &self,
        request: &DomainQuery,
        _context: &ContextSnapshot,
    ) -> SwitchboardResult<UnifiedResult> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("query:{}:{}", self.domain, request.operation));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(reason) = &self.fail_query {
            return Err(AdapterError::Backend {
                domain: self.domain,
                reason: reason.clone(),
            }
            .into());
        }
        let mut result = UnifiedResult::new(
            self.domain,
            request.operation.clone(),
            self.primary.clone(),
            chrono::Utc::now(),
        )
        .with_confidence(self.confidence);
        result.completeness = 1.0;
        result.payload.metadata.source = "mock".to_string();
        Ok(result)
    }

    async fn execute(
        &self,
        action: &Action,
        _context: &ContextSnapshot,
    ) -> SwitchboardResult<ActionOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("execute:{}:{}", self.domain, action.operation));
        if let Some(reason) = &self.fail_execute {
            return Err(AdapterError::Backend {
                domain: self.domain,
                reason: reason.clone(),
            }
            .into());
        }
        Ok(ActionOutcome {
            result: serde_json::json!({"executed": action.operation}),
            affected: self.affected.clone(),
        })
    }

    async fn capture_state(
        &self,
        _action: &Action,
        _context: &ContextSnapshot,
    ) -> SwitchboardResult<Option<serde_json::Value>> {
        Ok(self.snapshot_state.clone())
    }

    async fn restore_state(&self, snapshot: &RollbackSnapshot) -> SwitchboardResult<()> {
        self.restored.lock().unwrap().push(snapshot.clone());
        Ok(())
    }

    async fn health_check(&self) -> SwitchboardResult<HealthCheck> {
        if let Some(reason) = &self.fail_health {
            return Err(AdapterError::Backend {
                domain: self.domain,
                reason: reason.clone(),
            }
            .into());
        }
        Ok(HealthCheck::healthy(self.domain))
    }
}
