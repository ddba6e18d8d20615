//! Demo adapter.
//!
//! Serves locally-synthesized payloads straight from the context
//! snapshot, flagged as demo data. Hosts use it as the degraded fallback
//! for a domain whose backing service is unavailable, and as a reference
//! implementation of the read-path contract.

use crate::adapter::{DomainAdapter, ValidationResult};
use async_trait::async_trait;
use serde_json::json;
use switchboard_core::{
    normalize_confidence, Capability, ConfidenceScale, Domain, DomainQuery, HealthCheck, Insight,
    InsightSeverity, SuggestedAction, SwitchboardResult, UnifiedResult,
};
use switchboard_context::{ContextSnapshot, EntitySummary};

/// Read-only adapter answering from the context snapshot's domain lists.
pub struct DemoAdapter {
    domain: Domain,
}

impl DemoAdapter {
    pub fn new(domain: Domain) -> Self {
        Self { domain }
    }

    /// Native-scale confidence a demo payload reports for this domain.
    fn native_confidence(&self) -> serde_json::Value {
        match self.domain {
            // Satisfaction-grade scale
            Domain::Customers => json!("B"),
            // Urgency score out of ten
            Domain::Dispatch => json!(7),
            // Percentage
            Domain::Payments => json!(70),
            _ => json!(0.7),
        }
    }

    fn items<'a>(&self, context: &'a ContextSnapshot) -> &'a [EntitySummary] {
        match self.domain {
            Domain::Customers => &context.domain.customers,
            Domain::Dispatch => &context.domain.technicians,
            Domain::Tickets => &context.domain.tickets,
            Domain::Scheduling | Domain::Search | Domain::Payments => &context.domain.work_orders,
        }
    }
}

#[async_trait]
impl DomainAdapter for DemoAdapter {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::Query, Capability::Summarization]
    }

    async fn query(
        &self,
        request: &DomainQuery,
        context: &ContextSnapshot,
    ) -> SwitchboardResult<UnifiedResult> {
        let items = self.items(context);
        let listed: Vec<serde_json::Value> = items
            .iter()
            .map(|item| {
                json!({
                    "id": item.id,
                    "name": item.name,
                    "detail": item.detail,
                    "available": item.available,
                })
            })
            .collect();

        let scale = ConfidenceScale::for_domain(self.domain);
        let confidence = normalize_confidence(scale, &self.native_confidence());

        let mut result = UnifiedResult::new(
            self.domain,
            request.operation.clone(),
            json!({ "items": listed, "count": items.len() }),
            chrono::Utc::now(),
        )
        .with_confidence(confidence);

        result.payload.metadata.source = "demo".to_string();
        result.payload.metadata.demo_data = true;
        result.payload.metadata.context_fields = vec![format!("domain.{}", self.domain)];
        result.completeness = if items.is_empty() { 0.0 } else { 1.0 };
        result.stats.records_examined = items.len() as u64;
        result
            .limitations
            .push("Synthesized from the current context; backing service not consulted".to_string());

        let unavailable = items.iter().filter(|i| !i.available).count();
        if unavailable > 0 {
            result.insights.push(Insight {
                text: format!("{unavailable} of {} entries are unavailable", items.len()),
                severity: InsightSeverity::Notice,
            });
            result.suggested_actions.push(SuggestedAction {
                label: "Review unavailable entries".to_string(),
                domain: self.domain,
                operation: "search".to_string(),
            });
        }
        if items.is_empty() {
            result
                .follow_ups
                .push(format!("No {} data in context; try refreshing", self.domain));
        }

        Ok(result)
    }

    fn validate(&self, request: &DomainQuery) -> ValidationResult {
        if request.operation.trim().is_empty() {
            return ValidationResult::invalid("Operation is required");
        }
        ValidationResult::valid()
    }

    fn examples(&self) -> Vec<String> {
        match self.domain {
            Domain::Customers => vec!["Show me John Smith's activity summary".to_string()],
            Domain::Dispatch => vec!["Which technicians are available today?".to_string()],
            Domain::Tickets => vec!["Show open tickets".to_string()],
            _ => Vec::new(),
        }
    }

    async fn health_check(&self) -> SwitchboardResult<HealthCheck> {
        // Demo data is always reachable, but only ever degraded service.
        Ok(HealthCheck::degraded(self.domain, "serving demo data"))
    }
}
