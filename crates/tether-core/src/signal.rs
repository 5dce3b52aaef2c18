//! Ordered observer registry with idempotent unsubscription.
//!
//! [`Signal`] replaces ad-hoc callback lists throughout the framework.
//! Subscribers are held in subscription order and identified by a
//! [`SubscriberId`] token issued at subscribe time. Delivery snapshots
//! the subscriber list under the lock and invokes callbacks strictly
//! outside it, so a subscriber may re-enter the signal (subscribe,
//! unsubscribe, even emit) without deadlocking.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one subscription on one [`Signal`].
///
/// Tokens are never reused within a signal's lifetime, so a stale token
/// passed to [`Signal::unsubscribe`] is simply a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// An ordered, thread-safe set of subscribers for events of type `E`.
pub struct Signal<E> {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(SubscriberId, Callback<E>)>>,
}

impl<E> Signal<E> {
    /// Create an empty signal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a callback, returning a token for later removal.
    ///
    /// Callbacks are invoked in subscription order on whichever thread
    /// calls [`emit`](Self::emit).
    pub fn subscribe(&self, callback: impl Fn(&E) + Send + Sync + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscription. Idempotent: returns `false` if the token
    /// was already removed (or never existed).
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subs = self.subscribers.lock();
        match subs.iter().position(|(sid, _)| *sid == id) {
            Some(idx) => {
                let _ = subs.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Deliver an event to every current subscriber.
    ///
    /// The subscriber list is snapshotted under the lock; callbacks run
    /// after the lock is released. A subscriber removed concurrently
    /// with `emit` may still observe this event (it was present when the
    /// snapshot was taken) — callers needing exactly-once handling gate
    /// on their own state, as the command pipeline does.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = {
            let subs = self.subscribers.lock();
            subs.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in snapshot {
            callback(event);
        }
    }

    /// Number of current subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
