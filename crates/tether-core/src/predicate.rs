//! Aggregate-liveness predicates over a fixed proxy collection.
//!
//! A predicate folds the per-proxy `is_connected` flags into the single
//! derived boolean a host exposes. Predicates must be pure: they are
//! invoked concurrently from whichever transport threads deliver
//! liveness events.

use crate::proxy::TransportProxy;
use std::sync::Arc;

/// A pure function from a proxy collection to an aggregate liveness flag.
pub type ConnectedPredicate<P> = Arc<dyn Fn(&[Arc<P>]) -> bool + Send + Sync>;

/// True iff at least one proxy reports connected. False for an empty set.
#[must_use]
pub fn any_connected<P: TransportProxy + ?Sized>() -> ConnectedPredicate<P> {
    Arc::new(|proxies| proxies.iter().any(|p| p.is_connected()))
}

/// True iff every proxy reports connected. Vacuously true for an empty set.
#[must_use]
pub fn all_connected<P: TransportProxy + ?Sized>() -> ConnectedPredicate<P> {
    Arc::new(|proxies| proxies.iter().all(|p| p.is_connected()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProxyId;
    use crate::signal::Signal;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubProxy {
        id: ProxyId,
        connected: AtomicBool,
        events: Signal<crate::proxy::ProxyEvent>,
    }

    impl StubProxy {
        fn new(connected: bool) -> Arc<Self> {
            Arc::new(Self {
                id: ProxyId::new(),
                connected: AtomicBool::new(connected),
                events: Signal::new(),
            })
        }
    }

    impl TransportProxy for StubProxy {
        fn id(&self) -> &ProxyId {
            &self.id
        }
        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::SeqCst)
        }
        fn open(&self) -> crate::errors::Result<()> {
            Ok(())
        }
        fn close(&self) {}
        fn events(&self) -> &Signal<crate::proxy::ProxyEvent> {
            &self.events
        }
    }

    #[test]
    fn any_connected_true_with_one_live() {
        let proxies = vec![StubProxy::new(false), StubProxy::new(true)];
        assert!(any_connected::<StubProxy>()(&proxies));
    }

    #[test]
    fn any_connected_false_with_none_live() {
        let proxies = vec![StubProxy::new(false), StubProxy::new(false)];
        assert!(!any_connected::<StubProxy>()(&proxies));
    }

    #[test]
    fn all_connected_false_with_one_down() {
        let proxies = vec![StubProxy::new(true), StubProxy::new(false)];
        assert!(!all_connected::<StubProxy>()(&proxies));
    }

    #[test]
    fn all_connected_true_with_all_live() {
        let proxies = vec![StubProxy::new(true), StubProxy::new(true)];
        assert!(all_connected::<StubProxy>()(&proxies));
    }

    #[test]
    fn empty_set_any_is_false_all_is_true() {
        let proxies: Vec<Arc<StubProxy>> = Vec::new();
        assert!(!any_connected::<StubProxy>()(&proxies));
        // Vacuous truth preserved for the all-connected policy
        assert!(all_connected::<StubProxy>()(&proxies));
    }
}
