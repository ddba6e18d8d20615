//! Action validation.
//!
//! Structural checks first, then domain-specific rules against the context
//! snapshot. A failure is a descriptive string that becomes the failed
//! result's user-visible error.

use switchboard_adapters::ValidateNonEmpty;
use switchboard_context::ContextSnapshot;
use switchboard_core::{Action, Domain};

/// Minimum execution-eligible action confidence.
pub const MIN_ACTION_CONFIDENCE: f32 = 0.5;
/// Minimum ticket description length, in characters.
pub const MIN_TICKET_DESCRIPTION_LEN: usize = 10;

/// Validate an action. `Ok(())` means the action may proceed to
/// authorization.
pub fn validate_action(action: &Action, context: &ContextSnapshot) -> Result<(), String> {
    validate_structure(action)?;
    validate_domain_rules(action, context)
}

fn validate_structure(action: &Action) -> Result<(), String> {
    action.operation.validate_non_empty("operation")?;

    if !action.payload.is_object() {
        return Err("Action payload must be an object".to_string());
    }

    if action.confidence < MIN_ACTION_CONFIDENCE {
        return Err(format!(
            "Action confidence {:.2} is below the {MIN_ACTION_CONFIDENCE} execution threshold",
            action.confidence
        ));
    }

    for requirement in &action.requirements {
        if !requirement.satisfied {
            return Err(format!("Requirement not satisfied: {}", requirement.name));
        }
    }

    Ok(())
}

fn validate_domain_rules(action: &Action, context: &ContextSnapshot) -> Result<(), String> {
    match action.domain {
        Domain::Tickets if action.operation.contains("create") => {
            let description = action.payload_str("description").unwrap_or_default();
            if description.trim().len() < MIN_TICKET_DESCRIPTION_LEN {
                return Err(format!(
                    "Ticket description must be at least {MIN_TICKET_DESCRIPTION_LEN} characters"
                ));
            }
            if ticket_customer_id(action).is_none() {
                return Err("Customer ID required to create a ticket".to_string());
            }
            Ok(())
        }
        Domain::Dispatch if action.operation.contains("assign") => {
            let key = action
                .payload_str("technician_id")
                .or_else(|| action.payload_str("technician"))
                .ok_or_else(|| "Technician is required for assignment".to_string())?;
            let technician = context
                .domain
                .technician(key)
                .ok_or_else(|| format!("Unknown technician: {key}"))?;
            if !technician.available {
                return Err(format!("Technician {} is not available", technician.name));
            }
            Ok(())
        }
        Domain::Scheduling => {
            let date = action.payload_str("date").unwrap_or_default();
            let time = action.payload_str("time").unwrap_or_default();
            if date.trim().is_empty() || time.trim().is_empty() {
                return Err("Date and time are required for scheduling".to_string());
            }
            if let Some(technician) = action
                .payload_str("technician_id")
                .or_else(|| action.payload_str("technician"))
            {
                if context.domain.has_schedule_conflict(technician, date, time) {
                    return Err(format!("Schedule conflict for {technician} at {date} {time}"));
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn ticket_customer_id(action: &Action) -> Option<&str> {
    action
        .payload_str("customer_id")
        .or_else(|| action.payload_str("customerId"))
        .filter(|id| !id.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use switchboard_context::{
        AppContext, DomainContext, EntitySummary, Role, ScheduleSlot, SessionContext, UserContext,
        Viewport,
    };
    use switchboard_core::{ActionKind, ActionRequirement};

    fn context() -> ContextSnapshot {
        ContextSnapshot {
            user: UserContext {
                user_id: "op-1".to_string(),
                role: Role::Dispatcher,
                permissions: Vec::new(),
                preferences: BTreeMap::new(),
            },
            app: AppContext {
                current_page: "/dispatch".to_string(),
                current_entity: None,
                recent_activity: Vec::new(),
                navigation_history: Vec::new(),
                viewport: Viewport {
                    width: 1280,
                    height: 720,
                },
            },
            domain: DomainContext {
                technicians: vec![
                    EntitySummary {
                        id: "t-1".to_string(),
                        name: "Dana Reyes".to_string(),
                        detail: None,
                        available: true,
                    },
                    EntitySummary {
                        id: "t-2".to_string(),
                        name: "Omar Webb".to_string(),
                        detail: None,
                        available: false,
                    },
                ],
                schedule: vec![ScheduleSlot {
                    technician: "t-1".to_string(),
                    date: "2026-08-10".to_string(),
                    time: "09:00".to_string(),
                }],
                ..Default::default()
            },
            session: SessionContext {
                session_id: "s-1".to_string(),
                conversation: Vec::new(),
                active_intents: Vec::new(),
                pending_actions: Vec::new(),
                executed_actions: Vec::new(),
            },
            built_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_low_confidence_always_fails() {
        let action = Action::new(ActionKind::Create, Domain::Tickets, "create_ticket")
            .with_payload(serde_json::json!({
                "description": "Heater not working in unit 4",
                "customer_id": "c-1"
            }))
            .with_confidence(0.49);
        assert!(validate_action(&action, &context()).is_err());
    }

    #[test]
    fn test_missing_customer_id_names_the_field() {
        let action = Action::new(ActionKind::Create, Domain::Tickets, "create_ticket")
            .with_payload(serde_json::json!({"description": "Test ticket description"}));
        let err = validate_action(&action, &context()).unwrap_err();
        assert!(err.contains("Customer ID required"), "got: {err}");
    }

    #[test]
    fn test_short_ticket_description_rejected() {
        let action = Action::new(ActionKind::Create, Domain::Tickets, "create_ticket")
            .with_payload(serde_json::json!({"description": "short", "customer_id": "c-1"}));
        assert!(validate_action(&action, &context()).is_err());
    }

    #[test]
    fn test_valid_ticket_creation_passes() {
        let action = Action::new(ActionKind::Create, Domain::Tickets, "create_ticket")
            .with_payload(serde_json::json!({
                "description": "Heater not working in unit 4",
                "customer_id": "c-1"
            }));
        assert!(validate_action(&action, &context()).is_ok());
    }

    #[test]
    fn test_unsatisfied_requirement_rejected() {
        let mut action = Action::new(ActionKind::Create, Domain::Tickets, "create_ticket")
            .with_payload(serde_json::json!({
                "description": "Heater not working in unit 4",
                "customer_id": "c-1"
            }));
        action.requirements.push(ActionRequirement {
            name: "customer_confirmed".to_string(),
            description: "Customer confirmed the visit".to_string(),
            satisfied: false,
        });
        let err = validate_action(&action, &context()).unwrap_err();
        assert!(err.contains("customer_confirmed"));
    }

    #[test]
    fn test_assignment_requires_known_available_technician() {
        let base = Action::new(ActionKind::Assign, Domain::Dispatch, "assign_technician");

        let missing = base.clone();
        assert!(validate_action(&missing, &context()).is_err());

        let unknown = base
            .clone()
            .with_payload(serde_json::json!({"technician_id": "t-9"}));
        let err = validate_action(&unknown, &context()).unwrap_err();
        assert!(err.contains("Unknown technician"));

        let unavailable = base
            .clone()
            .with_payload(serde_json::json!({"technician_id": "t-2"}));
        let err = validate_action(&unavailable, &context()).unwrap_err();
        assert!(err.contains("not available"));

        let ok = base.with_payload(serde_json::json!({"technician_id": "t-1"}));
        assert!(validate_action(&ok, &context()).is_ok());
    }

    #[test]
    fn test_scheduling_requires_date_time_and_free_slot() {
        let base = Action::new(ActionKind::Schedule, Domain::Scheduling, "schedule_visit");

        let incomplete = base
            .clone()
            .with_payload(serde_json::json!({"date": "2026-08-10"}));
        assert!(validate_action(&incomplete, &context()).is_err());

        let conflicting = base.clone().with_payload(serde_json::json!({
            "date": "2026-08-10", "time": "09:00", "technician_id": "t-1"
        }));
        let err = validate_action(&conflicting, &context()).unwrap_err();
        assert!(err.contains("conflict"));

        let ok = base.with_payload(serde_json::json!({
            "date": "2026-08-10", "time": "10:00", "technician_id": "t-1"
        }));
        assert!(validate_action(&ok, &context()).is_ok());
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let action = Action::new(ActionKind::Notify, Domain::Customers, "notify_customer")
            .with_payload(serde_json::json!("just a string"));
        assert!(validate_action(&action, &context()).is_err());
    }
}
