//! SWITCHBOARD Orchestrator
//!
//! Turns an intent into a dependency-ordered execution plan, drives the
//! plan through the adapter registry, folds the per-adapter results into
//! one unified response, and exposes the caller-facing API surface:
//! `process_query`, `stream_query`, `execute_action`, `rollback_action`,
//! register/unregister, and adapter health.

pub mod aggregate;
pub mod orchestrator;
pub mod planner;
pub mod stream;

pub use aggregate::{aggregate, select_strategy};
pub use orchestrator::Orchestrator;
pub use planner::ExecutionPlanner;
pub use stream::{ResponseChunk, ORCHESTRATION_ERROR, STREAM_ERROR};
