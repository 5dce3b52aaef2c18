//! Keyed resource registry shared by logical service adapters.

use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;
use tether_core::HostId;
use tracing::debug;

/// A registered resource. Identity is the allocation, not the value:
/// attaching the same `Arc` twice is a no-op, and detaching compares by
/// pointer.
pub type Resource = Arc<dyn Any + Send + Sync>;

/// Associates logical resources with a physical host identity.
///
/// Multiple logical adapters may share one physical host key; each
/// attaches and detaches its own resource independently. Passed
/// explicitly to every adapter that needs it — there is no process-wide
/// instance.
#[derive(Default)]
pub struct ResourceRegistry {
    entries: DashMap<HostId, Vec<Resource>>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Associate `resource` with `host`. Order of attachment is
    /// preserved; re-attaching the same allocation is a no-op.
    pub fn attach(&self, host: &HostId, resource: Resource) {
        let mut entry = self.entries.entry(host.clone()).or_default();
        if !entry
            .iter()
            .any(|existing| std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(&resource)))
        {
            entry.push(resource);
            debug!(host = %host, resources = entry.len(), "resource attached");
        }
    }

    /// Remove `resource` from `host`'s entry. Idempotent: returns
    /// `false` if the resource was not attached. Empty entries are
    /// dropped.
    pub fn detach(&self, host: &HostId, resource: &Resource) -> bool {
        let removed = match self.entries.get_mut(host) {
            Some(mut entry) => {
                let before = entry.len();
                entry.retain(|existing| {
                    !std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(resource))
                });
                before != entry.len()
            }
            None => false,
        };
        let _ = self.entries.remove_if(host, |_, resources| resources.is_empty());
        if removed {
            debug!(host = %host, "resource detached");
        }
        removed
    }

    /// All resources currently attached to `host`, in attachment order.
    #[must_use]
    pub fn resources(&self, host: &HostId) -> Vec<Resource> {
        self.entries
            .get(host)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Resources attached to `host` that downcast to `T`.
    #[must_use]
    pub fn find<T: Send + Sync + 'static>(&self, host: &HostId) -> Vec<Arc<T>> {
        self.resources(host)
            .into_iter()
            .filter_map(|resource| resource.downcast::<T>().ok())
            .collect()
    }

    /// Number of host keys with at least one resource.
    #[must_use]
    pub fn host_count(&self) -> usize {
        self.entries.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
