//! Per-peer liveness topic.
//!
//! The transport layer raises connect/disconnect notifications for
//! individual peer sessions through a [`PeerMediator`]. Events carry an
//! explicit host key and session key; adapters route on those keys
//! instead of inspecting the notifying object's identity.

use std::sync::Arc;
use tether_core::{HostId, SessionKey, Signal, SubscriberId};
use tracing::debug;

/// Which way a peer's liveness changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeerEventKind {
    /// The peer's session became live.
    Connected,
    /// The peer's session was lost.
    Disconnected,
}

/// One per-peer liveness notification.
pub struct PeerEvent<S> {
    /// Key of the physical host the session belongs to.
    pub host: HostId,
    /// Identity of the peer's session on that host.
    pub key: SessionKey,
    /// Direction of the change.
    pub kind: PeerEventKind,
    /// The peer session instance itself.
    pub session: Arc<S>,
}

/// Topic distributing [`PeerEvent`]s to host adapters.
pub struct PeerMediator<S> {
    signal: Signal<PeerEvent<S>>,
}

impl<S> PeerMediator<S> {
    /// Create an empty mediator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Register a listener for peer events.
    pub fn subscribe(
        &self,
        callback: impl Fn(&PeerEvent<S>) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.signal.subscribe(callback)
    }

    /// Remove a listener. Idempotent.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.signal.unsubscribe(id)
    }

    /// Number of current listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.signal.subscriber_count()
    }

    /// Announce that a peer's session became live on `host`.
    pub fn notify_connected(&self, host: HostId, key: SessionKey, session: Arc<S>) {
        debug!(host = %host, session = %key, "peer connected");
        self.signal.emit(&PeerEvent {
            host,
            key,
            kind: PeerEventKind::Connected,
            session,
        });
    }

    /// Announce that a peer's session was lost on `host`.
    pub fn notify_disconnected(&self, host: HostId, key: SessionKey, session: Arc<S>) {
        debug!(host = %host, session = %key, "peer disconnected");
        self.signal.emit(&PeerEvent {
            host,
            key,
            kind: PeerEventKind::Disconnected,
            session,
        });
    }
}

impl<S> Default for PeerMediator<S> {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
