//! Context manager caching behavior under simulated time.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use switchboard_context::{
    AppContext, ContextManager, ContextSource, DomainContext, Role, SessionContext, UserContext,
    Viewport,
};
use switchboard_core::ContextError;
use switchboard_test_utils::ManualClock;

/// Source that counts how many times each section is loaded.
struct CountingSource {
    loads: AtomicUsize,
}

impl CountingSource {
    fn new() -> Self {
        Self {
            loads: AtomicUsize::new(0),
        }
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContextSource for CountingSource {
    async fn load_user(&self, user_id: &str) -> Result<UserContext, ContextError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(UserContext {
            user_id: user_id.to_string(),
            role: Role::Dispatcher,
            permissions: Vec::new(),
            preferences: Default::default(),
        })
    }

    async fn load_app(&self, _session_id: &str) -> Result<AppContext, ContextError> {
        Ok(AppContext {
            current_page: "/dashboard".to_string(),
            current_entity: None,
            recent_activity: Vec::new(),
            navigation_history: Vec::new(),
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
        })
    }

    async fn load_domain(&self, _user_id: &str) -> Result<DomainContext, ContextError> {
        Ok(DomainContext::default())
    }

    async fn load_session(&self, session_id: &str) -> Result<SessionContext, ContextError> {
        Ok(SessionContext {
            session_id: session_id.to_string(),
            conversation: Vec::new(),
            active_intents: Vec::new(),
            pending_actions: Vec::new(),
            executed_actions: Vec::new(),
        })
    }
}

fn manager(source: Arc<CountingSource>, clock: Arc<ManualClock>) -> ContextManager {
    ContextManager::new(source, Duration::from_secs(30), clock)
}

#[tokio::test]
async fn cached_snapshot_served_within_ttl() {
    let source = Arc::new(CountingSource::new());
    let clock = Arc::new(ManualClock::new());
    let manager = manager(Arc::clone(&source), Arc::clone(&clock));

    let first = manager.snapshot("op-1", "s-1").await.unwrap();
    clock.advance(chrono::Duration::seconds(10));
    let second = manager.snapshot("op-1", "s-1").await.unwrap();

    assert_eq!(source.loads(), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn snapshot_rebuilt_after_expiry() {
    let source = Arc::new(CountingSource::new());
    let clock = Arc::new(ManualClock::new());
    let manager = manager(Arc::clone(&source), Arc::clone(&clock));

    manager.snapshot("op-1", "s-1").await.unwrap();
    clock.advance(chrono::Duration::seconds(31));
    manager.snapshot("op-1", "s-1").await.unwrap();

    assert_eq!(source.loads(), 2);
}

#[tokio::test]
async fn refresh_bypasses_cache() {
    let source = Arc::new(CountingSource::new());
    let clock = Arc::new(ManualClock::new());
    let manager = manager(Arc::clone(&source), Arc::clone(&clock));

    manager.snapshot("op-1", "s-1").await.unwrap();
    manager.refresh("op-1", "s-1").await.unwrap();

    assert_eq!(source.loads(), 2);
}

#[tokio::test]
async fn distinct_sessions_get_distinct_snapshots() {
    let source = Arc::new(CountingSource::new());
    let clock = Arc::new(ManualClock::new());
    let manager = manager(Arc::clone(&source), Arc::clone(&clock));

    let a = manager.snapshot("op-1", "s-1").await.unwrap();
    let b = manager.snapshot("op-1", "s-2").await.unwrap();

    assert_eq!(source.loads(), 2);
    assert_eq!(a.session.session_id, "s-1");
    assert_eq!(b.session.session_id, "s-2");
}

#[tokio::test]
async fn invalidate_forces_rebuild_on_next_lookup() {
    let source = Arc::new(CountingSource::new());
    let clock = Arc::new(ManualClock::new());
    let manager = manager(Arc::clone(&source), Arc::clone(&clock));

    manager.snapshot("op-1", "s-1").await.unwrap();
    manager.invalidate("op-1", "s-1");
    manager.snapshot("op-1", "s-1").await.unwrap();

    assert_eq!(source.loads(), 2);
}
