//! Service-host adapter driving per-peer lifecycle.

use crate::mediator::{PeerEventKind, PeerMediator};
use crate::registry::{Resource, ResourceRegistry};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tether_core::{HostId, Lifecycle, SessionKey, SubscriberId};
use tracing::{debug, trace, warn};

/// The underlying transport host capability (consumed, not owned by
/// this crate).
pub trait ServiceHost: Send + Sync {
    /// Identity of the physical host; keys the resource registry.
    fn id(&self) -> &HostId;

    /// Start accepting inbound connections.
    fn open(&self) -> tether_core::Result<()>;

    /// Unconditional teardown (best-effort abort, not graceful drain).
    fn abort(&self);
}

/// Hosts inbound connections and drives a per-peer attach/detach
/// lifecycle scoped to each peer session.
///
/// Peer routing semantics: a freshly (re)connected peer is *detached* —
/// removed from whatever pending/disconnected tracking the lifecycle
/// implementation maintains — and a peer that drops is *attached* as a
/// pending resource. Events keyed to a different host are ignored.
pub struct PeerHostAdapter<S: Send + Sync + 'static> {
    host: Arc<dyn ServiceHost>,
    registry: Arc<ResourceRegistry>,
    mediator: Arc<PeerMediator<S>>,
    lifecycle: Arc<dyn Lifecycle<S>>,
    subscription: Mutex<Option<SubscriberId>>,
    // Self-reference for registering this adapter as a registry
    // resource without requiring callers to thread the Arc back in.
    weak_self: Weak<Self>,
}

impl<S: Send + Sync + 'static> PeerHostAdapter<S> {
    /// Create an adapter wired to the mediator.
    ///
    /// The mediator subscription is held for the adapter's whole
    /// lifetime and removed on drop.
    pub fn new(
        host: Arc<dyn ServiceHost>,
        registry: Arc<ResourceRegistry>,
        mediator: Arc<PeerMediator<S>>,
        lifecycle: Arc<dyn Lifecycle<S>>,
    ) -> Arc<Self> {
        let adapter = Arc::new_cyclic(|weak_self: &Weak<Self>| Self {
            host,
            registry,
            mediator: Arc::clone(&mediator),
            lifecycle,
            subscription: Mutex::new(None),
            weak_self: weak_self.clone(),
        });

        let weak = Arc::downgrade(&adapter);
        let token = mediator.subscribe(move |event| {
            if let Some(adapter) = weak.upgrade() {
                adapter.on_peer_event(
                    event.host.clone(),
                    event.key.clone(),
                    event.kind,
                    &event.session,
                );
            }
        });
        *adapter.subscription.lock() = Some(token);
        adapter
    }

    /// Key of the physical host this adapter serves.
    #[must_use]
    pub fn host_id(&self) -> &HostId {
        self.host.id()
    }

    /// Register this adapter in the resource registry under the host's
    /// key, then open the underlying transport host.
    pub fn open(&self) -> tether_core::Result<()> {
        if let Some(me) = self.weak_self.upgrade() {
            self.registry.attach(self.host.id(), me as Resource);
        }
        if let Err(error) = self.host.open() {
            warn!(host = %self.host.id(), %error, "service host open failed");
            return Err(error);
        }
        debug!(host = %self.host.id(), "service host opened");
        Ok(())
    }

    /// Abort the underlying transport host, then deregister from the
    /// resource registry.
    pub fn close(&self) {
        self.host.abort();
        if let Some(me) = self.weak_self.upgrade() {
            let resource: Resource = me;
            let _ = self.registry.detach(self.host.id(), &resource);
        }
        debug!(host = %self.host.id(), "service host closed");
    }

    fn on_peer_event(&self, host: HostId, key: SessionKey, kind: PeerEventKind, session: &Arc<S>) {
        if host != *self.host.id() {
            trace!(event_host = %host, adapter_host = %self.host.id(), session = %key, "ignoring peer event for foreign host");
            return;
        }
        match kind {
            // The peer arrived: stop tracking it as absent.
            PeerEventKind::Connected => {
                debug!(host = %host, session = %key, "peer session live, untracking");
                self.lifecycle.detach(session);
            }
            // The peer dropped: track it as a pending resource.
            PeerEventKind::Disconnected => {
                debug!(host = %host, session = %key, "peer session lost, tracking as pending");
                self.lifecycle.attach(session);
            }
        }
    }
}

impl<S: Send + Sync + 'static> Drop for PeerHostAdapter<S> {
    fn drop(&mut self) {
        if let Some(token) = self.subscription.lock().take() {
            let _ = self.mediator.unsubscribe(token);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
