//! Execution plan types.
//!
//! A plan is built fresh per query and discarded after execution. Phases
//! run in list order; a phase's `depends_on` ids must all appear earlier
//! in the list, which [`ExecutionPlan::validate_dependencies`] enforces
//! before any query is dispatched.

use crate::enums::{Domain, QueryPriority};
use crate::error::PlanningError;
use crate::identity::{new_entity_id, DurationMs, EntityId};
use crate::intent::Intent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashSet;

/// One adapter call within a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainQuery {
    pub query_id: EntityId,
    pub domain: Domain,
    pub operation: String,
    pub parameters: BTreeMap<String, serde_json::Value>,
    pub priority: QueryPriority,
}

impl DomainQuery {
    /// Create a query against a domain with the given operation.
    pub fn new(domain: Domain, operation: impl Into<String>, priority: QueryPriority) -> Self {
        Self {
            query_id: new_entity_id(),
            domain,
            operation: operation.into(),
            parameters: BTreeMap::new(),
            priority,
        }
    }

    /// Attach a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// An ordered group of domain queries with explicit parallelism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Stable id referenced by later phases' `depends_on`
    pub phase_id: String,
    pub name: String,
    pub queries: Vec<DomainQuery>,
    /// When true, all queries are dispatched concurrently
    pub parallel: bool,
    /// Ids of phases that must complete before this one starts
    pub depends_on: Vec<String>,
}

/// Dependency-ordered grouping of domain queries for one intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub plan_id: EntityId,
    pub intent: Intent,
    pub phases: Vec<Phase>,
    pub estimated_duration_ms: DurationMs,
}

impl ExecutionPlan {
    /// Verify that every `depends_on` id names a phase earlier in the list.
    ///
    /// A forward or dangling reference is a fatal planning error; execution
    /// must not start on such a plan.
    pub fn validate_dependencies(&self) -> Result<(), PlanningError> {
        let mut completed: HashSet<&str> = HashSet::new();
        for phase in &self.phases {
            for dep in &phase.depends_on {
                if !completed.contains(dep.as_str()) {
                    return Err(PlanningError::DependenciesNotMet {
                        phase: phase.phase_id.clone(),
                        missing: dep.clone(),
                    });
                }
            }
            completed.insert(phase.phase_id.as_str());
        }
        Ok(())
    }

    /// Every domain referenced anywhere in the plan, first appearance order.
    pub fn domains(&self) -> Vec<Domain> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for phase in &self.phases {
            for query in &phase.queries {
                if seen.insert(query.domain) {
                    out.push(query.domain);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::IntentKind;

    fn plan_with_phases(phases: Vec<Phase>) -> ExecutionPlan {
        ExecutionPlan {
            plan_id: new_entity_id(),
            intent: Intent::new(IntentKind::Query, "search"),
            phases,
            estimated_duration_ms: 0,
        }
    }

    fn phase(id: &str, depends_on: &[&str]) -> Phase {
        Phase {
            phase_id: id.to_string(),
            name: id.to_string(),
            queries: vec![DomainQuery::new(
                Domain::Tickets,
                "search",
                QueryPriority::Primary,
            )],
            parallel: false,
            depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_dependencies_in_order_are_valid() {
        let plan = plan_with_phases(vec![phase("gather", &[]), phase("execute", &["gather"])]);
        assert!(plan.validate_dependencies().is_ok());
    }

    #[test]
    fn test_forward_dependency_is_fatal() {
        let plan = plan_with_phases(vec![phase("execute", &["gather"]), phase("gather", &[])]);
        let err = plan.validate_dependencies().unwrap_err();
        assert!(err.to_string().contains("Dependencies not met"));
    }

    #[test]
    fn test_dangling_dependency_is_fatal() {
        let plan = plan_with_phases(vec![phase("execute", &["missing"])]);
        assert!(plan.validate_dependencies().is_err());
    }

    #[test]
    fn test_domains_preserve_first_appearance() {
        let mut gather = phase("gather", &[]);
        gather.queries = vec![
            DomainQuery::new(Domain::Customers, "search", QueryPriority::Primary),
            DomainQuery::new(Domain::Tickets, "search", QueryPriority::Supporting),
            DomainQuery::new(Domain::Customers, "search", QueryPriority::Supporting),
        ];
        let plan = plan_with_phases(vec![gather]);
        assert_eq!(plan.domains(), vec![Domain::Customers, Domain::Tickets]);
    }
}
