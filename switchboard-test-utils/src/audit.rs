//! In-memory audit sink.

use async_trait::async_trait;
use std::sync::Mutex;
use switchboard_actions::{AuditEntry, AuditSink};

/// Collects audit entries in memory; can be switched into a failing mode
/// to prove audit errors are swallowed.
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
    failing: bool,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    /// A sink whose every write fails.
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    /// Entries recorded so far.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, entry: &AuditEntry) -> Result<(), String> {
        if self.failing {
            return Err("audit sink offline".to_string());
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
