//! Action authorization.
//!
//! Role-based permission lookup combined with the user's individually
//! granted permissions, then domain rules and temporal business rules.
//! A denial is a descriptive string that becomes the failed result's
//! user-visible error.

use chrono::NaiveDate;
use switchboard_context::{Clock, ContextSnapshot, Role};
use switchboard_core::{Action, Domain, OrchestratorConfig};

/// Permissions granted by each role. `*` grants everything; `domain.*`
/// grants every operation kind in that domain.
fn role_permissions(role: Role) -> &'static [&'static str] {
    match role {
        Role::Administrator => &["*"],
        Role::Manager => &[
            "tickets.*",
            "dispatch.*",
            "scheduling.*",
            "customers.*",
            "search.*",
            "payments.update",
            "payments.notify",
        ],
        Role::Dispatcher => &[
            "dispatch.assign",
            "dispatch.update",
            "dispatch.optimize",
            "scheduling.schedule",
            "scheduling.update",
            "tickets.create",
            "tickets.update",
            "customers.notify",
        ],
        Role::Technician => &["tickets.update", "dispatch.update"],
    }
}

/// Authorize an action for the context's user. `Ok(())` means the action
/// may proceed to execution.
pub fn authorize_action(
    action: &Action,
    context: &ContextSnapshot,
    config: &OrchestratorConfig,
    clock: &dyn Clock,
) -> Result<(), String> {
    let role = context.user.role;
    let needed = format!("{}.{}", action.domain, action.kind);

    let granted = role_permissions(role)
        .iter()
        .copied()
        .chain(context.user.permissions.iter().map(String::as_str))
        .any(|perm| permission_grants(perm, &needed));

    if !granted {
        return Err(format!(
            "Role {role:?} is not permitted to perform {needed}"
        ));
    }

    domain_rules(action, role, config)?;
    temporal_rules(action, role, config, clock)
}

fn permission_grants(perm: &str, needed: &str) -> bool {
    if perm == "*" || perm == needed {
        return true;
    }
    match perm.strip_suffix(".*") {
        Some(prefix) => needed
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.')),
        None => false,
    }
}

fn domain_rules(action: &Action, role: Role, config: &OrchestratorConfig) -> Result<(), String> {
    match action.domain {
        Domain::Payments => {
            if let Some(amount) = action.payload_f64("amount") {
                if amount > config.payment_approval_threshold && role != Role::Administrator {
                    return Err(format!(
                        "Payments over {:.2} require administrator approval",
                        config.payment_approval_threshold
                    ));
                }
            }
            Ok(())
        }
        Domain::Scheduling => {
            let emergency = action
                .payload
                .get("emergency")
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
                || action.operation.contains("emergency");
            if emergency && role == Role::Technician {
                return Err("Technicians cannot perform emergency reschedules".to_string());
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn temporal_rules(
    action: &Action,
    role: Role,
    config: &OrchestratorConfig,
    clock: &dyn Clock,
) -> Result<(), String> {
    if action.domain != Domain::Scheduling {
        return Ok(());
    }
    let Some(date) = action.payload_str("date") else {
        return Ok(());
    };
    let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return Err(format!("Unparseable scheduling date: {date}"));
    };

    let today = clock.now().date_naive();
    if date < today {
        return Err("Cannot schedule in the past".to_string());
    }
    let horizon = today + chrono::Duration::days(config.advance_limit_days);
    if date > horizon && !matches!(role, Role::Manager | Role::Administrator) {
        return Err(format!(
            "Scheduling more than {} days ahead requires manager approval",
            config.advance_limit_days
        ));
    }
    Ok(())
}
