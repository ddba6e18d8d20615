//! Audit sink.
//!
//! Every governed action emits one structured audit record. Writes are
//! best-effort: a failing sink is logged and swallowed, never surfaced to
//! the action's result.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use switchboard_context::Role;
use switchboard_core::{Domain, DurationMs, EntityId, EntityRef, Timestamp};

/// Structured audit record for one governed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action_id: EntityId,
    pub user_id: String,
    pub domain: Domain,
    pub operation: String,
    pub success: bool,
    pub duration_ms: DurationMs,
    pub affected: Vec<EntityRef>,
    /// Page the operator was on when the action ran
    pub page: String,
    pub role: Role,
    pub at: Timestamp,
}

/// Destination for audit records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Write one audit record. Errors are descriptive strings; the caller
    /// logs and discards them.
    async fn record(&self, entry: &AuditEntry) -> Result<(), String>;
}

/// Default sink that emits audit records as structured log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, entry: &AuditEntry) -> Result<(), String> {
        tracing::info!(
            action_id = %entry.action_id,
            user_id = %entry.user_id,
            domain = %entry.domain,
            operation = %entry.operation,
            success = entry.success,
            duration_ms = entry.duration_ms,
            affected = entry.affected.len(),
            "action audited"
        );
        Ok(())
    }
}
