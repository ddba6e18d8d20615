//! Adapter registry.
//!
//! An explicit registry object passed to the orchestrator at construction,
//! keyed by [`Domain`]. Register/unregister are the only mutations; reads
//! vastly outnumber them, so a std `RwLock` over a `HashMap` suffices.

use crate::adapter::DomainAdapter;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use switchboard_core::{Domain, PlanningError, SwitchboardResult};

/// Registry of domain adapters, keyed by domain identifier.
pub struct AdapterRegistry {
    adapters: RwLock<HashMap<Domain, Arc<dyn DomainAdapter>>>,
}

impl AdapterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: RwLock::new(HashMap::new()),
        }
    }

    /// Register an adapter under its declared domain.
    /// Replaces any previously registered adapter for that domain.
    pub fn register(&self, adapter: Arc<dyn DomainAdapter>) {
        let mut adapters = self.adapters.write().expect("adapter registry poisoned");
        adapters.insert(adapter.domain(), adapter);
    }

    /// Remove the adapter for a domain, returning it if one was registered.
    pub fn unregister(&self, domain: Domain) -> Option<Arc<dyn DomainAdapter>> {
        let mut adapters = self.adapters.write().expect("adapter registry poisoned");
        adapters.remove(&domain)
    }

    /// Get the adapter for a domain.
    ///
    /// A missing adapter is a planning error: the phase that needed it
    /// cannot run.
    pub fn get(&self, domain: Domain) -> SwitchboardResult<Arc<dyn DomainAdapter>> {
        let adapters = self.adapters.read().expect("adapter registry poisoned");
        adapters
            .get(&domain)
            .cloned()
            .ok_or_else(|| PlanningError::AdapterNotFound { domain }.into())
    }

    /// Whether an adapter is registered for the domain.
    pub fn contains(&self, domain: Domain) -> bool {
        let adapters = self.adapters.read().expect("adapter registry poisoned");
        adapters.contains_key(&domain)
    }

    /// Snapshot of all registered adapters, for health fan-out.
    pub fn all(&self) -> Vec<Arc<dyn DomainAdapter>> {
        let adapters = self.adapters.read().expect("adapter registry poisoned");
        adapters.values().cloned().collect()
    }

    /// Registered domains.
    pub fn domains(&self) -> Vec<Domain> {
        let adapters = self.adapters.read().expect("adapter registry poisoned");
        adapters.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.adapters
            .read()
            .expect("adapter registry poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("domains", &self.domains())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::DomainAdapter;
    use async_trait::async_trait;
    use switchboard_core::{Capability, DomainQuery, SwitchboardResult, UnifiedResult};
    use switchboard_context::ContextSnapshot;

    struct NullAdapter(Domain);

    #[async_trait]
    impl DomainAdapter for NullAdapter {
        fn domain(&self) -> Domain {
            self.0
        }

        fn capabilities(&self) -> &[Capability] {
            &[Capability::Query]
        }

        async fn query(
            &self,
            request: &DomainQuery,
            _context: &ContextSnapshot,
        ) -> SwitchboardResult<UnifiedResult> {
            Ok(UnifiedResult::new(
                self.0,
                request.operation.clone(),
                serde_json::Value::Null,
                chrono::Utc::now(),
            ))
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = AdapterRegistry::new();
        registry.register(Arc::new(NullAdapter(Domain::Tickets)));
        assert!(registry.get(Domain::Tickets).is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_adapter_is_named_planning_error() {
        let registry = AdapterRegistry::new();
        let err = registry.get(Domain::Payments).err().unwrap();
        assert!(err
            .to_string()
            .contains("No adapter found for domain: payments"));
    }

    #[test]
    fn test_unregister_removes() {
        let registry = AdapterRegistry::new();
        registry.register(Arc::new(NullAdapter(Domain::Search)));
        assert!(registry.unregister(Domain::Search).is_some());
        assert!(registry.unregister(Domain::Search).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces_existing() {
        let registry = AdapterRegistry::new();
        registry.register(Arc::new(NullAdapter(Domain::Tickets)));
        registry.register(Arc::new(NullAdapter(Domain::Tickets)));
        assert_eq!(registry.len(), 1);
    }
}
