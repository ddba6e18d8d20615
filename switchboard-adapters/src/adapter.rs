//! Domain adapter trait.
//!
//! An adapter owns one business domain: it answers domain queries with a
//! [`UnifiedResult`] envelope, optionally executes actions, and reports
//! health. Implementations must be thread-safe (Send + Sync).
//!
//! Read-path contract: when the backing data source fails transiently, the
//! adapter degrades to locally-synthesized example data and flags it via
//! `payload.metadata.demo_data` instead of propagating the fault. Only a
//! malformed query is an error on the read path. Write paths propagate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use switchboard_core::{
    Action, AdapterError, Capability, Domain, DomainQuery, EntityRef, HealthCheck,
    RollbackSnapshot, SwitchboardResult, UnifiedResult,
};
use switchboard_context::ContextSnapshot;

/// Outcome of an adapter-executed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub result: serde_json::Value,
    pub affected: Vec<EntityRef>,
}

/// Result of structurally validating a domain query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing validation.
    pub fn valid() -> Self {
        Self::default()
    }

    /// A failing validation with one error.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A pluggable handler for one business domain's queries and actions.
#[async_trait]
pub trait DomainAdapter: Send + Sync {
    /// The fixed domain this adapter owns.
    fn domain(&self) -> Domain;

    /// Adapter implementation version.
    fn version(&self) -> &str {
        "0.1.0"
    }

    /// Capabilities this adapter declares support for.
    fn capabilities(&self) -> &[Capability];

    /// Answer a domain query against the given context.
    async fn query(
        &self,
        request: &DomainQuery,
        context: &ContextSnapshot,
    ) -> SwitchboardResult<UnifiedResult>;

    /// Execute a side-effecting action.
    ///
    /// The default declines; adapters that declare [`Capability::Action`]
    /// override this. An unhandled operation must surface as
    /// [`AdapterError::UnsupportedOperation`].
    async fn execute(
        &self,
        _action: &Action,
        _context: &ContextSnapshot,
    ) -> SwitchboardResult<ActionOutcome> {
        Err(AdapterError::ActionsUnsupported {
            domain: self.domain(),
        }
        .into())
    }

    /// Read the current state an action is about to overwrite.
    ///
    /// `Ok(None)` means no snapshot can be taken, which disables rollback
    /// for that action.
    async fn capture_state(
        &self,
        _action: &Action,
        _context: &ContextSnapshot,
    ) -> SwitchboardResult<Option<serde_json::Value>> {
        Ok(None)
    }

    /// Replay a rollback snapshot as a compensating write.
    async fn restore_state(&self, _snapshot: &RollbackSnapshot) -> SwitchboardResult<()> {
        Err(AdapterError::ActionsUnsupported {
            domain: self.domain(),
        }
        .into())
    }

    /// Structurally validate a query before dispatch.
    fn validate(&self, _request: &DomainQuery) -> ValidationResult {
        ValidationResult::valid()
    }

    /// JSON schema describing this adapter's payloads.
    fn schema(&self) -> serde_json::Value {
        serde_json::json!({})
    }

    /// Example queries this adapter answers well.
    fn examples(&self) -> Vec<String> {
        Vec::new()
    }

    /// Probe the adapter's backing service.
    async fn health_check(&self) -> SwitchboardResult<HealthCheck> {
        Ok(HealthCheck::healthy(self.domain()))
    }

    /// Whether the adapter declares the given capability.
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}
