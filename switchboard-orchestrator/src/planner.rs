//! Execution planner.
//!
//! Builds a fresh plan per intent. Query intents become one parallel
//! phase with a domain query per required domain. Action intents whose
//! operation creates something get a sequential data-gathering phase
//! before the execution phase that depends on it.

use switchboard_core::{
    new_entity_id, Domain, DomainQuery, ExecutionPlan, Intent, IntentKind, Phase, QueryPriority,
};

/// Flat per-query duration estimate, in milliseconds.
const QUERY_ESTIMATE_MS: i64 = 150;

const QUERY_PHASE_ID: &str = "query";
const GATHER_PHASE_ID: &str = "gather";
const EXECUTE_PHASE_ID: &str = "execute";

/// Turns intents into dependency-ordered execution plans. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionPlanner;

impl ExecutionPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Build a plan for the intent. The plan is discarded after execution.
    pub fn build(&self, intent: &Intent) -> ExecutionPlan {
        let phases = match intent.kind {
            IntentKind::Query => self.plan_query(intent),
            IntentKind::Action => self.plan_action(intent),
            // Navigation, help, and conversation produce no domain work.
            _ => Vec::new(),
        };

        let estimated_duration_ms = phases
            .iter()
            .map(|p| {
                if p.queries.is_empty() {
                    0
                } else if p.parallel {
                    QUERY_ESTIMATE_MS
                } else {
                    QUERY_ESTIMATE_MS * p.queries.len() as i64
                }
            })
            .sum();

        ExecutionPlan {
            plan_id: new_entity_id(),
            intent: intent.clone(),
            phases,
            estimated_duration_ms,
        }
    }

    /// Primary domain first, then every domain related to an extracted
    /// entity, duplicates removed preserving first appearance.
    pub fn required_domains(&self, intent: &Intent) -> Vec<Domain> {
        let mut out: Vec<Domain> = Vec::new();
        if let Some(primary) = intent.domain {
            out.push(primary);
        }
        for entity in &intent.entities {
            for domain in entity.kind.related_domains() {
                if !out.contains(domain) {
                    out.push(*domain);
                }
            }
        }
        out
    }

    fn plan_query(&self, intent: &Intent) -> Vec<Phase> {
        let domains = self.required_domains(intent);
        if domains.is_empty() {
            return Vec::new();
        }
        let primary = intent.domain.unwrap_or(domains[0]);

        let queries = domains
            .into_iter()
            .map(|domain| {
                let priority = if domain == primary {
                    QueryPriority::Primary
                } else {
                    QueryPriority::Supporting
                };
                let mut query = DomainQuery::new(domain, intent.operation.clone(), priority);
                query.parameters = intent.parameters.clone();
                query
            })
            .collect();

        vec![Phase {
            phase_id: QUERY_PHASE_ID.to_string(),
            name: "domain queries".to_string(),
            queries,
            parallel: true,
            depends_on: Vec::new(),
        }]
    }

    fn plan_action(&self, intent: &Intent) -> Vec<Phase> {
        let Some(primary) = self.required_domains(intent).first().copied() else {
            return Vec::new();
        };

        let mut phases = Vec::new();

        // Creations gather supporting data first, one domain at a time.
        if intent.operation.contains("create") {
            let supporting: Vec<DomainQuery> = self
                .required_domains(intent)
                .into_iter()
                .filter(|d| *d != primary)
                .map(|domain| {
                    let mut query = DomainQuery::new(domain, "search", QueryPriority::Supporting);
                    query.parameters = intent.parameters.clone();
                    query
                })
                .collect();
            if !supporting.is_empty() {
                phases.push(Phase {
                    phase_id: GATHER_PHASE_ID.to_string(),
                    name: "data gathering".to_string(),
                    queries: supporting,
                    parallel: false,
                    depends_on: Vec::new(),
                });
            }
        }

        let depends_on = if phases.is_empty() {
            Vec::new()
        } else {
            vec![GATHER_PHASE_ID.to_string()]
        };
        let mut execute = DomainQuery::new(primary, intent.operation.clone(), QueryPriority::Primary);
        execute.parameters = intent.parameters.clone();
        phases.push(Phase {
            phase_id: EXECUTE_PHASE_ID.to_string(),
            name: "action execution".to_string(),
            queries: vec![execute],
            parallel: false,
            depends_on,
        });

        phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::{Entity, EntityKind, EntityProvenance};

    fn entity(kind: EntityKind, value: &str) -> Entity {
        Entity {
            kind,
            value: value.to_string(),
            confidence: 0.7,
            provenance: EntityProvenance::pattern("test"),
        }
    }

    #[test]
    fn test_query_intent_builds_one_parallel_phase() {
        let mut intent = Intent::new(IntentKind::Query, "search").with_domain(Domain::Customers);
        intent.entities.push(entity(EntityKind::Date, "tomorrow"));

        let plan = ExecutionPlanner::new().build(&intent);
        assert_eq!(plan.phases.len(), 1);
        let phase = &plan.phases[0];
        assert!(phase.parallel);
        assert!(phase.depends_on.is_empty());
        assert_eq!(phase.queries.len(), 2);
        assert_eq!(phase.queries[0].domain, Domain::Customers);
        assert_eq!(phase.queries[0].priority, QueryPriority::Primary);
        assert_eq!(phase.queries[1].domain, Domain::Scheduling);
        assert_eq!(phase.queries[1].priority, QueryPriority::Supporting);
    }

    #[test]
    fn test_required_domains_dedup_preserves_first_appearance() {
        let mut intent = Intent::new(IntentKind::Query, "search").with_domain(Domain::Dispatch);
        intent.entities.push(entity(EntityKind::WorkOrder, "1042"));
        intent.entities.push(entity(EntityKind::Technician, "Dana"));
        intent.entities.push(entity(EntityKind::Customer, "John Smith"));

        let domains = ExecutionPlanner::new().required_domains(&intent);
        assert_eq!(domains, vec![Domain::Dispatch, Domain::Customers]);
    }

    #[test]
    fn test_create_action_gets_gather_phase() {
        let mut intent = Intent::new(IntentKind::Action, "create").with_domain(Domain::Tickets);
        intent
            .entities
            .push(entity(EntityKind::Customer, "John Smith"));

        let plan = ExecutionPlanner::new().build(&intent);
        assert_eq!(plan.phases.len(), 2);
        assert_eq!(plan.phases[0].phase_id, "gather");
        assert!(!plan.phases[0].parallel);
        assert_eq!(plan.phases[1].phase_id, "execute");
        assert_eq!(plan.phases[1].depends_on, vec!["gather".to_string()]);
        assert_eq!(plan.phases[1].queries.len(), 1);
        assert_eq!(plan.phases[1].queries[0].domain, Domain::Tickets);
        assert!(plan.validate_dependencies().is_ok());
    }

    #[test]
    fn test_non_create_action_is_single_phase() {
        let intent = Intent::new(IntentKind::Action, "assign").with_domain(Domain::Dispatch);
        let plan = ExecutionPlanner::new().build(&intent);
        assert_eq!(plan.phases.len(), 1);
        assert_eq!(plan.phases[0].phase_id, "execute");
        assert!(plan.phases[0].depends_on.is_empty());
    }

    #[test]
    fn test_create_without_supporting_domains_skips_gather() {
        let intent = Intent::new(IntentKind::Action, "create").with_domain(Domain::Tickets);
        let plan = ExecutionPlanner::new().build(&intent);
        assert_eq!(plan.phases.len(), 1);
        assert_eq!(plan.phases[0].phase_id, "execute");
    }

    #[test]
    fn test_conversation_intent_has_no_phases() {
        let intent = Intent::new(IntentKind::Conversation, "respond");
        let plan = ExecutionPlanner::new().build(&intent);
        assert!(plan.phases.is_empty());
        assert_eq!(plan.estimated_duration_ms, 0);
    }

    #[test]
    fn test_duration_estimate() {
        let mut intent = Intent::new(IntentKind::Query, "search").with_domain(Domain::Customers);
        intent.entities.push(entity(EntityKind::Date, "tomorrow"));
        let plan = ExecutionPlanner::new().build(&intent);
        // One parallel phase counts a single slot.
        assert_eq!(plan.estimated_duration_ms, 150);

        let mut intent = Intent::new(IntentKind::Action, "create").with_domain(Domain::Tickets);
        intent
            .entities
            .push(entity(EntityKind::Customer, "John Smith"));
        intent.entities.push(entity(EntityKind::Date, "tomorrow"));
        let plan = ExecutionPlanner::new().build(&intent);
        // Sequential gather (2 queries) + execute (1 query).
        assert_eq!(plan.estimated_duration_ms, 450);
    }
}
