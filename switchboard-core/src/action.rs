//! Action types for the side-effecting path.

use crate::enums::{ActionKind, ActionStatus, Domain, EntityKind};
use crate::identity::{new_entity_id, DurationMs, EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A precondition declared on an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequirement {
    pub name: String,
    pub description: String,
    pub satisfied: bool,
}

/// A proposed side-effecting operation against one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action_id: EntityId,
    pub kind: ActionKind,
    pub domain: Domain,
    /// Free-form operation name ("create_ticket", "assign_technician", ...)
    pub operation: String,
    /// Domain-specific payload; must be a JSON object
    pub payload: serde_json::Value,
    pub requirements: Vec<ActionRequirement>,
    pub status: ActionStatus,
    /// Proposal confidence in [0, 1]; below 0.5 fails validation
    pub confidence: f32,
    pub estimated_impact: Option<String>,
}

impl Action {
    /// Create a pending action with an empty object payload.
    pub fn new(kind: ActionKind, domain: Domain, operation: impl Into<String>) -> Self {
        Self {
            action_id: new_entity_id(),
            kind,
            domain,
            operation: operation.into(),
            payload: serde_json::json!({}),
            requirements: Vec::new(),
            status: ActionStatus::Pending,
            confidence: 1.0,
            estimated_impact: None,
        }
    }

    /// Replace the payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Set the proposal confidence, clamped into [0, 1].
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Fetch a string field from the payload object.
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }

    /// Fetch a numeric field from the payload object.
    pub fn payload_f64(&self, key: &str) -> Option<f64> {
        self.payload.get(key).and_then(|v| v.as_f64())
    }
}

/// Reference to a domain entity affected by an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

/// Outcome of one governed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub action_id: EntityId,
    pub success: bool,
    pub result: Option<serde_json::Value>,
    pub error: Option<String>,
    pub duration_ms: DurationMs,
    pub affected: Vec<EntityRef>,
    pub rollback_available: bool,
}

impl ActionResult {
    /// A failure result; never carries affected entities or rollback.
    pub fn failure(action_id: EntityId, error: impl Into<String>, duration_ms: DurationMs) -> Self {
        Self {
            action_id,
            success: false,
            result: None,
            error: Some(error.into()),
            duration_ms,
            affected: Vec::new(),
            rollback_available: false,
        }
    }
}

/// Captured prior state enabling a compensating write.
///
/// Lives only in the originating orchestrator's bounded in-memory store;
/// there is no persistence guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackSnapshot {
    pub action_id: EntityId,
    pub domain: Domain,
    pub state: serde_json::Value,
    pub captured_at: Timestamp,
}
