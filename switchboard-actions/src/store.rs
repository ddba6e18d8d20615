//! Rollback snapshot store.
//!
//! Bounded, explicitly-expiring in-memory store keyed by action id.
//! Capacity eviction drops the oldest insertion; expiry is evaluated
//! lazily against the injected clock on every read. Snapshots live only
//! as long as the owning orchestrator instance.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use switchboard_context::Clock;
use switchboard_core::{EntityId, RollbackSnapshot, Timestamp};

struct StoredSnapshot {
    snapshot: RollbackSnapshot,
    stored_at: Timestamp,
}

struct Inner {
    entries: HashMap<EntityId, StoredSnapshot>,
    insertion_order: VecDeque<EntityId>,
}

/// Bounded LRU-with-TTL store for rollback snapshots.
pub struct RollbackStore {
    inner: Mutex<Inner>,
    capacity: usize,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl RollbackStore {
    pub fn new(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(1)),
            clock,
        }
    }

    /// Store a snapshot, evicting the oldest entry if at capacity.
    pub fn put(&self, snapshot: RollbackSnapshot) {
        let mut inner = self.inner.lock().expect("rollback store poisoned");
        let action_id = snapshot.action_id;
        if inner.entries.len() >= self.capacity && !inner.entries.contains_key(&action_id) {
            if let Some(oldest) = inner.insertion_order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }
        inner.insertion_order.retain(|id| *id != action_id);
        inner.insertion_order.push_back(action_id);
        inner.entries.insert(
            action_id,
            StoredSnapshot {
                snapshot,
                stored_at: self.clock.now(),
            },
        );
    }

    /// Remove and return the snapshot for an action, if present and live.
    pub fn take(&self, action_id: EntityId) -> Option<RollbackSnapshot> {
        let mut inner = self.inner.lock().expect("rollback store poisoned");
        let stored = inner.entries.remove(&action_id)?;
        inner.insertion_order.retain(|id| *id != action_id);
        if self.clock.now() - stored.stored_at > self.ttl {
            return None;
        }
        Some(stored.snapshot)
    }

    /// Remove the snapshot for an action without returning it.
    pub fn discard(&self, action_id: EntityId) {
        let mut inner = self.inner.lock().expect("rollback store poisoned");
        inner.entries.remove(&action_id);
        inner.insertion_order.retain(|id| *id != action_id);
    }

    /// Whether a live snapshot is retained for the action.
    pub fn contains(&self, action_id: EntityId) -> bool {
        let inner = self.inner.lock().expect("rollback store poisoned");
        match inner.entries.get(&action_id) {
            Some(stored) => self.clock.now() - stored.stored_at <= self.ttl,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("rollback store poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
