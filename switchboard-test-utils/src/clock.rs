//! Manual clock for simulated time.

use std::sync::Mutex;
use switchboard_context::Clock;
use switchboard_core::Timestamp;

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Start at the current wall-clock time.
    pub fn new() -> Self {
        Self {
            now: Mutex::new(chrono::Utc::now()),
        }
    }

    /// Start at a fixed RFC 3339 timestamp, e.g. `"2026-08-07T12:00:00Z"`.
    pub fn at(timestamp: &str) -> Self {
        Self {
            now: Mutex::new(timestamp.parse().expect("valid RFC 3339 timestamp")),
        }
    }

    /// Advance the clock.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    /// Pin the clock to a specific instant.
    pub fn set(&self, to: Timestamp) {
        *self.now.lock().unwrap() = to;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }
}
