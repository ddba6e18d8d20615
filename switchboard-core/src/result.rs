//! Unified result and response envelopes.
//!
//! Every adapter call returns a [`UnifiedResult`]; aggregation folds one or
//! more of them into the final, caller-facing [`UnifiedResponse`].

use crate::enums::{Domain, InsightSeverity};
use crate::identity::{new_entity_id, DurationMs, EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// Metadata attached to a result payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadMetadata {
    /// Identifier of the backing source ("crm-api", "demo", ...)
    pub source: String,
    /// True when the adapter degraded to locally-synthesized example data
    pub demo_data: bool,
    /// Context fields consulted while producing the payload
    pub context_fields: Vec<String>,
    pub generated_at: Timestamp,
}

/// Payload contributed by a domain other than the base result's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportingPayload {
    pub domain: Domain,
    pub value: serde_json::Value,
}

/// The data section of a unified result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    /// Primary payload; `Value::Null` for failure responses
    pub primary: serde_json::Value,
    pub supporting: Vec<SupportingPayload>,
    pub metadata: PayloadMetadata,
}

/// An actionable observation derived from a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
    pub severity: InsightSeverity,
}

/// A follow-up action the operator could take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub label: String,
    pub domain: Domain,
    pub operation: String,
}

/// Per-call processing statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub duration_ms: DurationMs,
    pub records_examined: u64,
    pub cache_hit: bool,
}

/// Canonical envelope for one adapter call's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedResult {
    pub domain: Domain,
    pub operation: String,
    pub payload: ResultPayload,
    /// Normalized confidence in [0, 1]
    pub confidence: f32,
    /// Fraction of payload fields that are populated, in [0, 1]
    pub completeness: f32,
    /// Decay since generation, 1.0 = just generated, in [0, 1]
    pub freshness: f32,
    pub insights: Vec<Insight>,
    pub suggested_actions: Vec<SuggestedAction>,
    pub follow_ups: Vec<String>,
    pub stats: ProcessingStats,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub limitations: Vec<String>,
}

impl UnifiedResult {
    /// Create a result with the given primary payload and neutral metadata.
    pub fn new(
        domain: Domain,
        operation: impl Into<String>,
        primary: serde_json::Value,
        generated_at: Timestamp,
    ) -> Self {
        Self {
            domain,
            operation: operation.into(),
            payload: ResultPayload {
                primary,
                supporting: Vec::new(),
                metadata: PayloadMetadata {
                    source: String::new(),
                    demo_data: false,
                    context_fields: Vec::new(),
                    generated_at,
                },
            },
            confidence: 0.0,
            completeness: 0.0,
            freshness: 1.0,
            insights: Vec::new(),
            suggested_actions: Vec::new(),
            follow_ups: Vec::new(),
            stats: ProcessingStats::default(),
            errors: Vec::new(),
            warnings: Vec::new(),
            limitations: Vec::new(),
        }
    }

    /// A failure envelope: null primary, zero confidence, follow-up hints.
    pub fn failure(
        domain: Domain,
        operation: impl Into<String>,
        error: impl Into<String>,
        follow_ups: Vec<String>,
        generated_at: Timestamp,
    ) -> Self {
        let mut result = Self::new(domain, operation, serde_json::Value::Null, generated_at);
        result.errors.push(error.into());
        result.follow_ups = follow_ups;
        result
    }

    /// Set the confidence, clamped into [0, 1].
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

/// Final, caller-facing aggregate of one processed query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedResponse {
    pub response_id: EntityId,
    /// Id of the intent this response answers
    pub query_id: EntityId,
    /// Session/conversation identifier, when known
    pub conversation_id: Option<String>,
    pub result: UnifiedResult,
    pub total_duration_ms: DurationMs,
    /// Domains consulted, order of first appearance
    pub domains: Vec<Domain>,
    pub created_at: Timestamp,
}

impl UnifiedResponse {
    /// Wrap an aggregated result for the caller.
    pub fn new(
        query_id: EntityId,
        result: UnifiedResult,
        domains: Vec<Domain>,
        total_duration_ms: DurationMs,
        created_at: Timestamp,
    ) -> Self {
        Self {
            response_id: new_entity_id(),
            query_id,
            conversation_id: None,
            result,
            total_duration_ms,
            domains,
            created_at,
        }
    }
}
