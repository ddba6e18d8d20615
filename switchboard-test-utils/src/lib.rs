//! SWITCHBOARD Test Utils
//!
//! Fixtures, mock adapters, a manual clock, and proptest generators shared
//! by the test suites of the other crates. Not part of the public API.

pub mod adapters;
pub mod audit;
pub mod clock;
pub mod fixtures;
pub mod generators;

pub use adapters::MockAdapter;
pub use audit::MemoryAuditSink;
pub use clock::ManualClock;
pub use fixtures::{context_with_role, sample_context};
