//! Query processor.
//!
//! Runs the full utterance-to-intent pipeline: normalize, extract
//! entities, classify, resolve domain and operation, score confidence,
//! and enrich from the context snapshot.

use crate::classify::{classify_kind, classify_priority, identify_domain, identify_operation};
use crate::entities::extract_entities;
use crate::normalize::normalize;
use switchboard_core::{Entity, EntityProvenance, Intent, IntentError, IntentKind};
use switchboard_context::ContextSnapshot;

/// Longest accepted utterance, in characters.
const MAX_QUERY_LEN: usize = 2000;

/// Base intent confidence before boosts.
const BASE_CONFIDENCE: f32 = 0.6;
/// Boost for a strong intent-indicator keyword.
const STRONG_KEYWORD_BOOST: f32 = 0.25;
/// Boost for an identified target domain.
const DOMAIN_BOOST: f32 = 0.10;
/// Per-entity boost, capped.
const ENTITY_BOOST: f32 = 0.05;
const ENTITY_BOOST_CAP: f32 = 0.15;

/// Confidence of an entity injected from the current page context.
const CONTEXT_ENTITY_CONFIDENCE: f32 = 0.9;

/// Converts natural-language text plus situational context into an
/// [`Intent`]. Stateless; all tables are static.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryProcessor;

impl QueryProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Process one operator utterance.
    ///
    /// Deterministic for identical (text, context) inputs, apart from the
    /// freshly minted intent id.
    pub fn process(
        &self,
        natural_query: &str,
        context: &ContextSnapshot,
    ) -> Result<Intent, IntentError> {
        if natural_query.trim().is_empty() {
            return Err(IntentError::EmptyQuery);
        }
        if natural_query.len() > MAX_QUERY_LEN {
            return Err(IntentError::QueryTooLong { max: MAX_QUERY_LEN });
        }

        let query = normalize(natural_query);
        let mut entities = extract_entities(&query);
        let (kind, strong_keyword) = classify_kind(&query);
        let operation = identify_operation(&query, kind);
        let priority = classify_priority(&query, kind);

        let domain = identify_domain(&query, &entities).or_else(|| {
            // Last resort: infer from whatever the operator is looking at.
            context
                .app
                .current_entity
                .as_ref()
                .and_then(|e| e.kind.related_domains().first().copied())
        });

        let mut confidence = BASE_CONFIDENCE;
        if strong_keyword {
            confidence += STRONG_KEYWORD_BOOST;
        }
        if domain.is_some() {
            confidence += DOMAIN_BOOST;
        }
        confidence += (ENTITY_BOOST * entities.len() as f32).min(ENTITY_BOOST_CAP);

        let mut intent = Intent::new(kind, operation);
        intent.priority = priority;
        intent.domain = domain;

        // Context enrichment: surface the current-page entity unless the
        // text already produced one of that kind.
        if let Some(current) = &context.app.current_entity {
            if !entities.iter().any(|e| e.kind == current.kind) {
                entities.push(Entity {
                    kind: current.kind,
                    value: current.value.clone(),
                    confidence: CONTEXT_ENTITY_CONFIDENCE,
                    provenance: EntityProvenance::current_page(),
                });
            }
        }

        // Parameters: one per extracted entity kind (first wins), then any
        // conversation-derived parameters that do not collide.
        for entity in &entities {
            let key = parameter_key(entity);
            intent
                .parameters
                .entry(key.to_string())
                .or_insert_with(|| serde_json::Value::String(entity.value.clone()));
        }
        if let Some(previous) = context.last_active_intent() {
            for (key, value) in &previous.parameters {
                intent
                    .parameters
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }

        intent.entities = entities;
        intent.requires_auth = kind == IntentKind::Action;
        Ok(intent.with_confidence(confidence))
    }
}

fn parameter_key(entity: &Entity) -> &'static str {
    match entity.kind {
        switchboard_core::EntityKind::Customer => "customer",
        switchboard_core::EntityKind::WorkOrder => "work_order",
        switchboard_core::EntityKind::Technician => "technician",
        switchboard_core::EntityKind::Date => "date",
        switchboard_core::EntityKind::Location => "location",
        switchboard_core::EntityKind::ServiceType => "service_type",
    }
}
