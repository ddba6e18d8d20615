//! Context manager.
//!
//! Aggregates the four context sections from a [`ContextSource`] into one
//! [`ContextSnapshot`], serving cached snapshots while they are live.

use crate::cache::SnapshotCache;
use crate::clock::Clock;
use crate::types::{AppContext, ContextSnapshot, DomainContext, SessionContext, UserContext};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use switchboard_core::{ContextError, SwitchboardResult};

/// External collaborators that supply context sections.
///
/// `load_user` is backed by the authentication/session subsystem;
/// the other loaders read application and domain state.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn load_user(&self, user_id: &str) -> Result<UserContext, ContextError>;
    async fn load_app(&self, session_id: &str) -> Result<AppContext, ContextError>;
    async fn load_domain(&self, user_id: &str) -> Result<DomainContext, ContextError>;
    async fn load_session(&self, session_id: &str) -> Result<SessionContext, ContextError>;
}

/// Builds and caches context snapshots keyed by (user, session).
pub struct ContextManager {
    source: Arc<dyn ContextSource>,
    cache: SnapshotCache,
    clock: Arc<dyn Clock>,
}

impl ContextManager {
    pub fn new(source: Arc<dyn ContextSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: SnapshotCache::new(ttl, Arc::clone(&clock)),
            clock,
        }
    }

    /// Get the current snapshot for a (user, session) key.
    ///
    /// Serves the cached snapshot while it is live; otherwise assembles a
    /// fresh one from the source and caches it.
    pub async fn snapshot(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> SwitchboardResult<Arc<ContextSnapshot>> {
        if let Some(snapshot) = self.cache.get(user_id, session_id) {
            return Ok(snapshot);
        }
        self.rebuild(user_id, session_id).await
    }

    /// Drop the cached snapshot and assemble a fresh one.
    pub async fn refresh(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> SwitchboardResult<Arc<ContextSnapshot>> {
        self.cache.invalidate(user_id, session_id);
        self.rebuild(user_id, session_id).await
    }

    /// Drop the cached snapshot without rebuilding.
    pub fn invalidate(&self, user_id: &str, session_id: &str) {
        self.cache.invalidate(user_id, session_id);
    }

    async fn rebuild(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> SwitchboardResult<Arc<ContextSnapshot>> {
        let user = self.source.load_user(user_id).await?;
        let app = self.source.load_app(session_id).await?;
        let domain = self.source.load_domain(user_id).await?;
        let session = self.source.load_session(session_id).await?;

        let snapshot = Arc::new(ContextSnapshot {
            user,
            app,
            domain,
            session,
            built_at: self.clock.now(),
        });
        self.cache
            .put(user_id, session_id, Arc::clone(&snapshot));
        Ok(snapshot)
    }
}
