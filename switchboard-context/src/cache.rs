//! Snapshot cache.
//!
//! An explicit key/value/expiry map over an injected [`Clock`], so the
//! time-to-live behavior is testable under simulated time. Entries are
//! immutable `Arc` snapshots and safe to hand to concurrent readers.

use crate::clock::Clock;
use crate::types::ContextSnapshot;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use switchboard_core::Timestamp;

/// Cache key: (user id, session id).
type Key = (String, String);

struct CacheEntry {
    snapshot: Arc<ContextSnapshot>,
    expires_at: Timestamp,
}

/// TTL cache for assembled context snapshots.
pub struct SnapshotCache {
    entries: RwLock<HashMap<Key, CacheEntry>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(30)),
            clock,
        }
    }

    /// Get a live snapshot for the key, if one is cached and unexpired.
    pub fn get(&self, user_id: &str, session_id: &str) -> Option<Arc<ContextSnapshot>> {
        let entries = self.entries.read().expect("snapshot cache lock poisoned");
        let entry = entries.get(&(user_id.to_string(), session_id.to_string()))?;
        if self.clock.now() < entry.expires_at {
            Some(Arc::clone(&entry.snapshot))
        } else {
            None
        }
    }

    /// Insert a snapshot, stamping its expiry from the injected clock.
    pub fn put(&self, user_id: &str, session_id: &str, snapshot: Arc<ContextSnapshot>) {
        let expires_at = self.clock.now() + self.ttl;
        let mut entries = self.entries.write().expect("snapshot cache lock poisoned");
        entries.insert(
            (user_id.to_string(), session_id.to_string()),
            CacheEntry {
                snapshot,
                expires_at,
            },
        );
    }

    /// Drop the entry for a key, forcing the next lookup to rebuild.
    pub fn invalidate(&self, user_id: &str, session_id: &str) {
        let mut entries = self.entries.write().expect("snapshot cache lock poisoned");
        entries.remove(&(user_id.to_string(), session_id.to_string()));
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write().expect("snapshot cache lock poisoned");
        entries.clear();
    }

    /// Number of entries, expired or not. Expired entries are evicted
    /// lazily on lookup, not by a sweeper.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("snapshot cache lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
