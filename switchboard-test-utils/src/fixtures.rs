//! Context snapshot fixtures.

use std::collections::BTreeMap;
use switchboard_context::{
    AppContext, ContextSnapshot, DomainContext, EntitySummary, Role, ScheduleSlot, SessionContext,
    UserContext, Viewport,
};

/// A populated dispatcher context: two customers, two technicians (one
/// unavailable), one work order, one occupied schedule slot.
pub fn sample_context() -> ContextSnapshot {
    context_with_role(Role::Dispatcher)
}

/// [`sample_context`] with a chosen operator role.
pub fn context_with_role(role: Role) -> ContextSnapshot {
    ContextSnapshot {
        user: UserContext {
            user_id: "op-1".to_string(),
            role,
            permissions: Vec::new(),
            preferences: BTreeMap::new(),
        },
        app: AppContext {
            current_page: "/dispatch/board".to_string(),
            current_entity: None,
            recent_activity: vec!["viewed WO-1042".to_string()],
            navigation_history: vec!["/dashboard".to_string(), "/dispatch/board".to_string()],
            viewport: Viewport {
                width: 1440,
                height: 900,
            },
        },
        domain: DomainContext {
            customers: vec![
                EntitySummary {
                    id: "c-1001".to_string(),
                    name: "John Smith".to_string(),
                    detail: Some("12 Elm St".to_string()),
                    available: true,
                },
                EntitySummary {
                    id: "c-1002".to_string(),
                    name: "Maria Ortiz".to_string(),
                    detail: Some("88 Oak Ave".to_string()),
                    available: true,
                },
            ],
            work_orders: vec![EntitySummary {
                id: "wo-1042".to_string(),
                name: "Furnace inspection".to_string(),
                detail: Some("scheduled".to_string()),
                available: true,
            }],
            tickets: vec![EntitySummary {
                id: "tk-77".to_string(),
                name: "No heat in unit 4".to_string(),
                detail: Some("open".to_string()),
                available: true,
            }],
            technicians: vec![
                EntitySummary {
                    id: "t-1".to_string(),
                    name: "Dana Reyes".to_string(),
                    detail: Some("HVAC".to_string()),
                    available: true,
                },
                EntitySummary {
                    id: "t-2".to_string(),
                    name: "Omar Webb".to_string(),
                    detail: Some("plumbing".to_string()),
                    available: false,
                },
            ],
            schedule: vec![ScheduleSlot {
                technician: "t-1".to_string(),
                date: "2026-08-10".to_string(),
                time: "09:00".to_string(),
            }],
        },
        session: SessionContext {
            session_id: "sess-42".to_string(),
            conversation: Vec::new(),
            active_intents: Vec::new(),
            pending_actions: Vec::new(),
            executed_actions: Vec::new(),
        },
        built_at: chrono::Utc::now(),
    }
}
