//! Intent and entity types.
//!
//! An [`Intent`] is the structured interpretation of one operator utterance.
//! It is created once by the query processor and never mutated after
//! context enrichment.

use crate::enums::{EntityKind, IntentKind, IntentPriority, ProvenanceSource};
use crate::identity::{new_entity_id, EntityId};
use crate::Domain;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where and how an entity was recognized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProvenance {
    /// What produced this entity
    pub source: ProvenanceSource,
    /// Free-form detail, e.g. the marker word or context field that matched
    pub detail: Option<String>,
}

impl EntityProvenance {
    /// Provenance for a pattern-table match.
    pub fn pattern(detail: impl Into<String>) -> Self {
        Self {
            source: ProvenanceSource::PatternMatch,
            detail: Some(detail.into()),
        }
    }

    /// Provenance for an entity injected from the current page context.
    pub fn current_page() -> Self {
        Self {
            source: ProvenanceSource::CurrentPageContext,
            detail: Some("current_page_context".to_string()),
        }
    }
}

/// An entity extracted from operator text or injected from context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// The recognized value, in its original casing
    pub value: String,
    /// Recognition confidence in [0, 1]
    pub confidence: f32,
    pub provenance: EntityProvenance,
}

/// Structured interpretation of a natural-language request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub intent_id: EntityId,
    pub kind: IntentKind,
    /// Target domain, when one could be identified
    pub domain: Option<Domain>,
    /// Free-form operation name ("search", "create", "assign", ...)
    pub operation: String,
    /// Extracted entities, ordered by first appearance
    pub entities: Vec<Entity>,
    /// Key/value parameters derived from text and conversation
    pub parameters: BTreeMap<String, serde_json::Value>,
    /// Overall classification confidence in [0, 1]
    pub confidence: f32,
    /// Whether executing this intent requires authorization checks
    pub requires_auth: bool,
    pub priority: IntentPriority,
}

impl Intent {
    /// Create an intent with the given kind and operation, empty otherwise.
    pub fn new(kind: IntentKind, operation: impl Into<String>) -> Self {
        Self {
            intent_id: new_entity_id(),
            kind,
            domain: None,
            operation: operation.into(),
            entities: Vec::new(),
            parameters: BTreeMap::new(),
            confidence: 0.0,
            requires_auth: kind == IntentKind::Action,
            priority: IntentPriority::Low,
        }
    }

    /// Set the target domain.
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Set the classification confidence, clamped into [0, 1].
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Whether an entity of the given kind is already present.
    pub fn has_entity_kind(&self, kind: EntityKind) -> bool {
        self.entities.iter().any(|e| e.kind == kind)
    }
}
