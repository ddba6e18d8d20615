//! Error types for Switchboard operations
//!
//! Validation and authorization denials on the action path are expected,
//! user-correctable outcomes and are represented as failed `ActionResult`s,
//! not as variants here. These enums cover the fatal and infrastructural
//! failures.

use crate::enums::Domain;
use crate::identity::EntityId;
use thiserror::Error;

/// Input errors from malformed operator requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("Query text is empty")]
    EmptyQuery,

    #[error("Query exceeds maximum length of {max} characters")]
    QueryTooLong { max: usize },
}

/// Planning errors. Fatal for the current query; the caller may rephrase
/// and retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanningError {
    #[error("Dependencies not met for phase {phase}: {missing} has not completed")]
    DependenciesNotMet { phase: String, missing: String },

    #[error("No adapter found for domain: {domain}")]
    AdapterNotFound { domain: Domain },

    #[error("Plan for intent {intent_id} contains no phases")]
    EmptyPlan { intent_id: EntityId },
}

/// Adapter and backing-service errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Malformed request for {domain}: {message}")]
    MalformedRequest { domain: Domain, message: String },

    #[error("Backing service call failed for {domain}: {reason}")]
    Backend { domain: Domain, reason: String },

    #[error("Operation {operation} is not supported by the {domain} adapter")]
    UnsupportedOperation { domain: Domain, operation: String },

    #[error("Adapter for {domain} does not execute actions")]
    ActionsUnsupported { domain: Domain },

    #[error("Query to {domain} timed out after {timeout_ms}ms")]
    Timeout { domain: Domain, timeout_ms: i64 },
}

/// Action orchestration errors on the rollback path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Action {action_id} not found in execution history")]
    UnknownAction { action_id: EntityId },

    #[error("Rollback is not available for action {action_id}")]
    RollbackUnavailable { action_id: EntityId },

    #[error("Action {action_id} has already been rolled back")]
    AlreadyRolledBack { action_id: EntityId },

    #[error("No rollback snapshot retained for action {action_id}")]
    SnapshotMissing { action_id: EntityId },
}

/// Context assembly errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("Context source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error("Unknown user: {user_id}")]
    UnknownUser { user_id: String },

    #[error("Unknown session: {session_id}")]
    UnknownSession { session_id: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all Switchboard errors.
#[derive(Debug, Clone, Error)]
pub enum SwitchboardError {
    #[error("Input error: {0}")]
    Intent(#[from] IntentError),

    #[error("Orchestration error: {0}")]
    Planning(#[from] PlanningError),

    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl SwitchboardError {
    /// Whether the caller may usefully rephrase/retry the request.
    ///
    /// Planning failures are recoverable in this sense; malformed input is
    /// recoverable by correction; infrastructure errors are not.
    pub fn recoverable(&self) -> bool {
        matches!(
            self,
            SwitchboardError::Planning(_) | SwitchboardError::Intent(_)
        )
    }
}

/// Result type alias for Switchboard operations.
pub type SwitchboardResult<T> = Result<T, SwitchboardError>;
