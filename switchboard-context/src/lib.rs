//! SWITCHBOARD Context - Context Assembly
//!
//! Builds the immutable-per-request [`ContextSnapshot`] consumed by every
//! other component, from the external auth/session and domain-state
//! collaborators, and caches snapshots keyed by (user, session) for a
//! short, configurable time-to-live.

pub mod cache;
pub mod clock;
pub mod manager;
pub mod types;

pub use cache::SnapshotCache;
pub use clock::{Clock, SystemClock};
pub use manager::{ContextManager, ContextSource};
pub use types::{
    AppContext, ContextSnapshot, ConversationTurn, DomainContext, EntitySummary, Role,
    ScheduleSlot, SessionContext, TurnRole, UserContext, Viewport,
};
