//! SWITCHBOARD Actions - Governed Action Execution
//!
//! The action orchestrator independently validates, authorizes, executes,
//! audits, and (on request) rolls back a single side-effecting action
//! against one domain. Validation and authorization denials are expected,
//! user-correctable outcomes: they produce failed
//! [`switchboard_core::ActionResult`]s, never errors.

pub mod audit;
pub mod authorize;
pub mod orchestrator;
pub mod store;
pub mod validate;

pub use audit::{AuditEntry, AuditSink, TracingAuditSink};
pub use orchestrator::ActionOrchestrator;
pub use store::RollbackStore;
