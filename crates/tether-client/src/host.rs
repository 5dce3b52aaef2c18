//! Aggregate host over a fixed set of redundant transport proxies.

use crate::errors::HostError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tether_core::{ConnectedPredicate, ProxyEvent, Signal, SubscriberId, TransportProxy};
use tracing::{debug, warn};

/// Presents N independently-connecting proxies as one logical
/// connection.
///
/// The proxy collection is fixed for the host's lifetime. Aggregate
/// liveness is derived by the injected predicate and changes only via a
/// compare-and-set inside [`refresh`](Self::refresh); subscribers are
/// notified on actual flips only, strictly after the state lock is
/// released, so a subscriber may re-enter the host synchronously.
///
/// `open`/`close`/`execute`/`execute_all` run on the caller's thread
/// and are not safe to call concurrently with each other on the same
/// host; liveness events, by contrast, may arrive concurrently from
/// independent transport threads at any time.
pub struct ProxyHost<P: TransportProxy + ?Sized + 'static> {
    proxies: Vec<Arc<P>>,
    predicate: ConnectedPredicate<P>,
    connected: Mutex<bool>,
    events: Signal<ProxyEvent>,
    // Subscription token per proxy index, populated by open().
    wiring: Mutex<HashMap<usize, SubscriberId>>,
    // Back-reference handed to proxy subscriptions so a dropped host
    // never keeps reacting to transport events.
    weak_self: Weak<Self>,
}

impl<P: TransportProxy + ?Sized + 'static> ProxyHost<P> {
    /// Create a host over a fixed proxy collection and liveness policy.
    ///
    /// The aggregate flag is seeded from the predicate immediately, so
    /// an empty collection under the all-connected policy reports live
    /// (vacuous truth) without waiting for an event that never comes.
    #[must_use]
    pub fn new(proxies: Vec<Arc<P>>, predicate: ConnectedPredicate<P>) -> Arc<Self> {
        let seeded = predicate(&proxies);
        Arc::new_cyclic(|weak_self| Self {
            proxies,
            predicate,
            connected: Mutex::new(seeded),
            events: Signal::new(),
            wiring: Mutex::new(HashMap::new()),
            weak_self: weak_self.clone(),
        })
    }

    /// Current aggregate liveness.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        *self.connected.lock()
    }

    /// The host's own liveness signal: `Connected`/`Disconnected` on
    /// aggregate flips, `Heartbeating` forwarded while live.
    #[must_use]
    pub fn events(&self) -> &Signal<ProxyEvent> {
        &self.events
    }

    /// The fixed proxy collection, in order.
    #[must_use]
    pub fn proxies(&self) -> &[Arc<P>] {
        &self.proxies
    }

    /// Subscribe to each proxy's events, then open it, in collection
    /// order.
    ///
    /// A failing proxy's error propagates to the caller with no
    /// rollback: proxies already opened remain open and subscribed.
    pub fn open(&self) -> tether_core::Result<()> {
        for (index, proxy) in self.proxies.iter().enumerate() {
            let weak = self.weak_self.clone();
            let token = proxy.events().subscribe(move |event| {
                if let Some(host) = weak.upgrade() {
                    host.on_proxy_event(*event);
                }
            });
            let _ = self.wiring.lock().insert(index, token);
            if let Err(error) = proxy.open() {
                warn!(proxy = %proxy.id(), %error, "proxy open failed");
                return Err(error);
            }
        }
        debug!(proxies = self.proxies.len(), "proxy host opened");
        Ok(())
    }

    /// Close each proxy, then drop its subscription, in collection
    /// order. Unconditional best-effort teardown.
    pub fn close(&self) {
        let mut wiring = std::mem::take(&mut *self.wiring.lock());
        for (index, proxy) in self.proxies.iter().enumerate() {
            proxy.close();
            if let Some(token) = wiring.remove(&index) {
                let _ = proxy.events().unsubscribe(token);
            }
        }
        debug!(proxies = self.proxies.len(), "proxy host closed");
    }

    /// Failover-first-success execution.
    ///
    /// Tries proxies in collection order; the first `Ok` returns
    /// immediately and later proxies are never invoked. Every error the
    /// delegate returns is swallowed (logged at debug, not preserved) —
    /// deliberately including errors unrelated to connectivity — and
    /// the next proxy is tried. Exhaustion of the whole set yields
    /// [`HostError::Exhausted`]; no partial result exists.
    pub fn execute<R, E>(
        &self,
        mut op: impl FnMut(&P) -> Result<R, E>,
    ) -> Result<R, HostError>
    where
        E: fmt::Display,
    {
        let mut attempts = 0;
        for proxy in &self.proxies {
            attempts += 1;
            match op(proxy) {
                Ok(result) => return Ok(result),
                Err(error) => {
                    debug!(proxy = %proxy.id(), %error, "failover attempt failed, trying next proxy");
                }
            }
        }
        Err(HostError::Exhausted { attempts })
    }

    /// All-must-succeed execution.
    ///
    /// Invokes the delegate against every proxy in collection order,
    /// collecting results in order. The first error aborts immediately
    /// and is returned unchanged; later proxies are never invoked and
    /// earlier results are discarded.
    pub fn execute_all<R, E>(
        &self,
        mut op: impl FnMut(&P) -> Result<R, E>,
    ) -> Result<Vec<R>, E> {
        let mut results = Vec::with_capacity(self.proxies.len());
        for proxy in &self.proxies {
            results.push(op(proxy)?);
        }
        Ok(results)
    }

    /// React to one proxy-level event, on the transport's thread.
    fn on_proxy_event(&self, event: ProxyEvent) {
        match event {
            ProxyEvent::Connected | ProxyEvent::Disconnected => self.refresh(),
            ProxyEvent::Heartbeating => {
                // Gate: forward only while the aggregate is live.
                if self.is_connected() {
                    self.events.emit(&ProxyEvent::Heartbeating);
                }
            }
        }
    }

    /// Recompute aggregate liveness and notify on an actual flip.
    ///
    /// The flip is committed inside the lock; the notification fires
    /// after the lock is released. Concurrent refreshes serialize on
    /// the lock, so at most one of them commits any given transition.
    fn refresh(&self) {
        let connected = (self.predicate)(&self.proxies);
        {
            let mut state = self.connected.lock();
            if *state == connected {
                return;
            }
            *state = connected;
        }
        debug!(connected, "aggregate liveness changed");
        if connected {
            self.events.emit(&ProxyEvent::Connected);
        } else {
            self.events.emit(&ProxyEvent::Disconnected);
        }
    }
}

impl<P: TransportProxy + ?Sized> fmt::Debug for ProxyHost<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyHost")
            .field("proxies", &self.proxies.len())
            .field("connected", &self.is_connected())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
