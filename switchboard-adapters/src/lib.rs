//! SWITCHBOARD Adapters - Domain Adapter Contract
//!
//! Defines the capability-declaring [`DomainAdapter`] trait every business
//! domain implements, and the explicit [`AdapterRegistry`] the orchestrator
//! is constructed with. Adapters must be explicitly registered - no
//! auto-discovery.

pub mod adapter;
pub mod demo;
pub mod registry;
pub mod validation;

pub use adapter::{ActionOutcome, DomainAdapter, ValidationResult};
pub use demo::DemoAdapter;
pub use registry::AdapterRegistry;
pub use validation::{ValidateNonEmpty, ValidateUnitRange};
