//! Context snapshot types.
//!
//! A snapshot is assembled once per (user, session) key, treated as
//! immutable, and shared behind an `Arc` with every concurrent reader.

use serde::{Deserialize, Serialize};
use switchboard_core::{Entity, EntityId, Intent, Timestamp};

/// Operator role, used for authorization decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Administrator,
    Manager,
    Dispatcher,
    Technician,
}

/// Identity section supplied by the authentication subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: String,
    pub role: Role,
    /// Individually granted permissions, in addition to the role's
    pub permissions: Vec<String>,
    pub preferences: std::collections::BTreeMap<String, String>,
}

/// Current viewport dimensions, for adapters that size their payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Application state section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppContext {
    pub current_page: String,
    /// Entity the operator is currently looking at, if any
    pub current_entity: Option<Entity>,
    pub recent_activity: Vec<String>,
    pub navigation_history: Vec<String>,
    pub viewport: Viewport,
}

/// Lightweight summary of a domain entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: String,
    pub name: String,
    pub detail: Option<String>,
    /// For technicians: currently assignable
    pub available: bool,
}

/// One occupied slot in the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub technician: String,
    /// ISO date, e.g. "2026-08-07"
    pub date: String,
    /// 24h time, e.g. "14:30"
    pub time: String,
}

/// Per-domain entity summaries visible to the operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainContext {
    pub customers: Vec<EntitySummary>,
    pub work_orders: Vec<EntitySummary>,
    pub tickets: Vec<EntitySummary>,
    pub technicians: Vec<EntitySummary>,
    pub schedule: Vec<ScheduleSlot>,
}

impl DomainContext {
    /// Look up a technician summary by id or name.
    pub fn technician(&self, key: &str) -> Option<&EntitySummary> {
        self.technicians
            .iter()
            .find(|t| t.id == key || t.name.eq_ignore_ascii_case(key))
    }

    /// Whether a schedule slot conflicts with the given date and time.
    pub fn has_schedule_conflict(&self, technician: &str, date: &str, time: &str) -> bool {
        self.schedule
            .iter()
            .any(|slot| slot.technician == technician && slot.date == date && slot.time == time)
    }
}

/// Who spoke a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Operator,
    Assistant,
}

/// One entry of the session's conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
    pub at: Timestamp,
}

/// Session state section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub conversation: Vec<ConversationTurn>,
    /// Intents produced earlier in this session, most recent last
    pub active_intents: Vec<Intent>,
    pub pending_actions: Vec<EntityId>,
    pub executed_actions: Vec<EntityId>,
}

/// Immutable-per-request aggregate of user, app, domain, and session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub user: UserContext,
    pub app: AppContext,
    pub domain: DomainContext,
    pub session: SessionContext,
    pub built_at: Timestamp,
}

impl ContextSnapshot {
    /// The most recent intent produced in this session, if any.
    pub fn last_active_intent(&self) -> Option<&Intent> {
        self.session.active_intents.last()
    }
}
