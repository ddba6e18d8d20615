//! Intent classification tables.
//!
//! Ordered keyword rules over the normalized query: query keywords are
//! tested first, then action, navigation, help, and finally greetings;
//! anything else defaults to a query. Operation keywords are likewise
//! ordered, with search terms first so "show me a summary" resolves to
//! `search` rather than `analyze`.

use crate::normalize::{contains_keyword, NormalizedQuery};
use switchboard_core::{Domain, Entity, IntentKind, IntentPriority};

const QUERY_KEYWORDS: &[&str] = &[
    "show", "find", "list", "get", "display", "search", "lookup", "view", "what", "which", "who",
    "when", "where", "how many", "status",
];

const ACTION_KEYWORDS: &[&str] = &[
    "create", "add", "schedule", "reschedule", "assign", "reassign", "dispatch", "update",
    "change", "cancel", "close", "notify", "send", "escalate", "optimize", "book", "delete",
    "remove",
];

const NAVIGATION_KEYWORDS: &[&str] = &["go to", "open", "navigate", "take me", "switch to"];

const HELP_KEYWORDS: &[&str] = &["help", "how do i", "how to", "what can you"];

const GREETING_KEYWORDS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "thanks",
    "thank you",
    "good morning",
    "good afternoon",
];

const URGENT_MARKERS: &[&str] = &[
    "urgent",
    "emergency",
    "asap",
    "immediately",
    "right away",
    "critical",
];

const SAME_DAY_MARKERS: &[&str] = &["today", "now", "soon"];

/// Ordered (operation, keywords) table. First table hit wins.
const OPERATION_TABLE: &[(&str, &[&str])] = &[
    (
        "search",
        &[
            "show", "find", "list", "get", "display", "search", "lookup", "view",
        ],
    ),
    ("create", &["create", "add", "new"]),
    ("update", &["update", "change", "modify", "edit"]),
    ("delete", &["delete", "remove"]),
    ("schedule", &["schedule", "reschedule", "book"]),
    ("assign", &["assign", "reassign", "dispatch"]),
    ("cancel", &["cancel", "close"]),
    ("notify", &["notify", "send", "email", "message"]),
    ("analyze", &["analyze", "analysis", "report", "trend", "summary"]),
    ("compare", &["compare", "versus", "vs"]),
    ("optimize", &["optimize", "balance"]),
];

/// Ordered (keyword, domain) table for explicit domain mentions.
const DOMAIN_KEYWORDS: &[(&str, Domain)] = &[
    ("ticket", Domain::Tickets),
    ("tickets", Domain::Tickets),
    ("dispatch", Domain::Dispatch),
    ("work order", Domain::Dispatch),
    ("technician", Domain::Dispatch),
    ("customer", Domain::Customers),
    ("client", Domain::Customers),
    ("schedule", Domain::Scheduling),
    ("appointment", Domain::Scheduling),
    ("calendar", Domain::Scheduling),
    ("reschedule", Domain::Scheduling),
    ("payment", Domain::Payments),
    ("invoice", Domain::Payments),
    ("billing", Domain::Payments),
    ("refund", Domain::Payments),
    ("search", Domain::Search),
];

fn any_keyword(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| contains_keyword(text, kw))
}

/// Classify the intent kind.
///
/// Returns the kind and whether a strong indicator keyword matched (the
/// default fallback does not count as strong).
pub fn classify_kind(query: &NormalizedQuery) -> (IntentKind, bool) {
    let text = &query.normalized;
    if any_keyword(text, QUERY_KEYWORDS) {
        (IntentKind::Query, true)
    } else if any_keyword(text, ACTION_KEYWORDS) {
        (IntentKind::Action, true)
    } else if any_keyword(text, NAVIGATION_KEYWORDS) {
        (IntentKind::Navigation, true)
    } else if any_keyword(text, HELP_KEYWORDS) {
        (IntentKind::Help, true)
    } else if any_keyword(text, GREETING_KEYWORDS) {
        (IntentKind::Conversation, true)
    } else {
        (IntentKind::Query, false)
    }
}

/// Identify the target domain: explicit keyword first, then inference from
/// extracted entities, in their order of appearance.
pub fn identify_domain(query: &NormalizedQuery, entities: &[Entity]) -> Option<Domain> {
    for (keyword, domain) in DOMAIN_KEYWORDS {
        if contains_keyword(&query.normalized, keyword) {
            return Some(*domain);
        }
    }
    entities
        .iter()
        .find_map(|e| e.kind.related_domains().first().copied())
}

/// Identify the operation from the ordered keyword table, falling back to
/// the default for the intent kind.
pub fn identify_operation(query: &NormalizedQuery, kind: IntentKind) -> String {
    for (operation, keywords) in OPERATION_TABLE {
        if any_keyword(&query.normalized, keywords) {
            return (*operation).to_string();
        }
    }
    default_operation(kind).to_string()
}

fn default_operation(kind: IntentKind) -> &'static str {
    match kind {
        IntentKind::Query => "search",
        IntentKind::Action => "execute",
        IntentKind::Navigation => "navigate",
        IntentKind::Help => "help",
        IntentKind::Conversation => "respond",
    }
}

/// Assign a priority from urgency markers in the text.
pub fn classify_priority(query: &NormalizedQuery, kind: IntentKind) -> IntentPriority {
    let text = &query.normalized;
    if any_keyword(text, URGENT_MARKERS) {
        IntentPriority::Urgent
    } else if any_keyword(text, SAME_DAY_MARKERS) {
        IntentPriority::High
    } else if kind == IntentKind::Action {
        IntentPriority::Medium
    } else {
        IntentPriority::Low
    }
}
