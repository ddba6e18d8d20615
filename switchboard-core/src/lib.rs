//! SWITCHBOARD Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types plus the small pure functions that
//! belong to them (dependency validation, confidence normalization).

pub mod action;
pub mod confidence;
pub mod config;
pub mod enums;
pub mod error;
pub mod health;
pub mod identity;
pub mod intent;
pub mod plan;
pub mod result;

pub use action::{Action, ActionRequirement, ActionResult, EntityRef, RollbackSnapshot};
pub use confidence::{normalize_confidence, ConfidenceScale, DEFAULT_CONFIDENCE};
pub use config::{OrchestratorConfig, PhaseFailurePolicy};
pub use enums::{
    ActionKind, ActionStatus, AggregationStrategy, Capability, Domain, EntityKind, InsightSeverity,
    IntentKind, IntentPriority, ProvenanceSource, QueryPriority,
};
pub use error::{
    ActionError, AdapterError, ConfigError, ContextError, IntentError, PlanningError,
    SwitchboardError, SwitchboardResult,
};
pub use health::{HealthCheck, HealthStatus};
pub use identity::{new_entity_id, DurationMs, EntityId, Timestamp};
pub use intent::{Entity, EntityProvenance, Intent};
pub use plan::{DomainQuery, ExecutionPlan, Phase};
pub use result::{
    Insight, PayloadMetadata, ProcessingStats, ResultPayload, SuggestedAction, SupportingPayload,
    UnifiedResponse, UnifiedResult,
};
