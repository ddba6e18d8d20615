//! Enum types for Switchboard entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// DOMAINS
// ============================================================================

/// Business domain handled by exactly one registered adapter.
///
/// Adapter resolution is keyed by this enum rather than free-form strings,
/// so an unhandled domain is a compile-time hole instead of a runtime typo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Work-order dispatch and technician assignment
    Dispatch,
    /// Support tickets
    Tickets,
    /// Customer records and activity
    Customers,
    /// Appointment scheduling
    Scheduling,
    /// Payments and invoicing
    Payments,
    /// Cross-domain record search
    Search,
}

impl Domain {
    /// All domains, in registry iteration order.
    pub const ALL: [Domain; 6] = [
        Domain::Dispatch,
        Domain::Tickets,
        Domain::Customers,
        Domain::Scheduling,
        Domain::Payments,
        Domain::Search,
    ];
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::Dispatch => "dispatch",
            Domain::Tickets => "tickets",
            Domain::Customers => "customers",
            Domain::Scheduling => "scheduling",
            Domain::Payments => "payments",
            Domain::Search => "search",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dispatch" => Ok(Domain::Dispatch),
            "tickets" => Ok(Domain::Tickets),
            "customers" => Ok(Domain::Customers),
            "scheduling" => Ok(Domain::Scheduling),
            "payments" => Ok(Domain::Payments),
            "search" => Ok(Domain::Search),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}

// ============================================================================
// INTENT ENUMS
// ============================================================================

/// Classified type of an operator utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    /// Read-only information request
    Query,
    /// Side-effecting request, routed through the action orchestrator
    Action,
    /// UI navigation request
    Navigation,
    /// Small talk, greetings, acknowledgements
    Conversation,
    /// Usage help
    Help,
}

/// Priority assigned to an intent during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Kind of entity recognized in operator text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    WorkOrder,
    Technician,
    Date,
    Location,
    ServiceType,
}

impl EntityKind {
    /// Domains related to an entity kind, used for domain inference and
    /// for adding supporting queries to a plan.
    pub fn related_domains(self) -> &'static [Domain] {
        match self {
            EntityKind::Customer => &[Domain::Customers],
            EntityKind::WorkOrder => &[Domain::Dispatch],
            EntityKind::Technician => &[Domain::Dispatch],
            EntityKind::Date => &[Domain::Scheduling],
            EntityKind::Location => &[Domain::Dispatch],
            EntityKind::ServiceType => &[Domain::Tickets],
        }
    }
}

/// Where an extracted entity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvenanceSource {
    /// Matched a recognition pattern in the query text
    PatternMatch,
    /// Injected from the context's current-page entity
    CurrentPageContext,
    /// Carried over from recent conversation
    Conversation,
}

// ============================================================================
// PLAN ENUMS
// ============================================================================

/// Role of a domain query within a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryPriority {
    /// The intent's target domain
    Primary,
    /// A related domain added for enrichment
    Supporting,
}

/// How multiple unified results are combined into one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationStrategy {
    /// First result is the base envelope, other primaries become supporting
    Merge,
    /// Highest (optionally weighted) confidence wins
    Prioritize,
    /// Alias of Merge until a real synthesis algorithm is specified
    Synthesize,
    /// Alias of Merge until a real comparison algorithm is specified
    Compare,
}

// ============================================================================
// ADAPTER ENUMS
// ============================================================================

/// Capability an adapter declares support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Query,
    Action,
    Analysis,
    Prediction,
    Recommendation,
    Classification,
    Summarization,
    Optimization,
}

// ============================================================================
// ACTION ENUMS
// ============================================================================

/// Kind of side-effecting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
    Schedule,
    Assign,
    Notify,
    Optimize,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Create => "create",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
            ActionKind::Schedule => "schedule",
            ActionKind::Assign => "assign",
            ActionKind::Notify => "notify",
            ActionKind::Optimize => "optimize",
        };
        write!(f, "{name}")
    }
}

/// Lifecycle status of an action.
///
/// `Succeeded`, `Failed`, and `RolledBack` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Validated,
    Executing,
    Succeeded,
    Failed,
    RolledBack,
}

/// Severity of an actionable insight attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Info,
    Notice,
    Warning,
}
