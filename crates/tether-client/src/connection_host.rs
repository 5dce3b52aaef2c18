//! Aggregate host that pairs each proxy with a factory-built
//! connection object.

use crate::errors::{HostError, Result};
use crate::host::ProxyHost;
use std::fmt;
use std::sync::Arc;
use tether_core::{ConnectedPredicate, Lifecycle, ProxyEvent, Signal, TransportProxy};
use tracing::debug;

/// A [`ProxyHost`] extended with one richer connection object per
/// proxy.
///
/// The factory runs once, at construction; producing no connection for
/// any proxy is fatal and aborts construction with no partial state.
/// The injected [`Lifecycle`] drives each connection's attach/detach in
/// lockstep with proxy lifecycle, with a deliberate asymmetry:
///
/// - `open` attaches every connection **before** any proxy is opened,
///   so a connection is ready to receive traffic before its transport
///   is live;
/// - `close` closes and unsubscribes every proxy **before** any
///   connection is detached, so a connection stays valid until its
///   transport is fully torn down.
///
/// Aggregate liveness, heartbeat gating, and the execution strategies
/// are those of the inner [`ProxyHost`], over the same proxy
/// collection.
pub struct ConnectionProxyHost<P: TransportProxy + ?Sized + 'static, C> {
    inner: Arc<ProxyHost<P>>,
    connections: Vec<C>,
    lifecycle: Arc<dyn Lifecycle<C>>,
}

impl<P: TransportProxy + ?Sized + 'static, C> ConnectionProxyHost<P, C> {
    /// Build one connection per proxy via `factory`, in collection
    /// order.
    ///
    /// Fails with [`HostError::FactoryFailed`] on the first proxy the
    /// factory produces no connection for.
    pub fn new(
        proxies: Vec<Arc<P>>,
        predicate: ConnectedPredicate<P>,
        lifecycle: Arc<dyn Lifecycle<C>>,
        factory: impl Fn(&Arc<P>) -> Option<C>,
    ) -> Result<Self> {
        let mut connections = Vec::with_capacity(proxies.len());
        for (index, proxy) in proxies.iter().enumerate() {
            match factory(proxy) {
                Some(connection) => connections.push(connection),
                None => return Err(HostError::FactoryFailed { index }),
            }
        }
        Ok(Self {
            inner: ProxyHost::new(proxies, predicate),
            connections,
            lifecycle,
        })
    }

    /// Attach every connection, then open the inner host (subscribe and
    /// open each proxy). A proxy open error propagates with no
    /// rollback; connections stay attached.
    pub fn open(&self) -> tether_core::Result<()> {
        for connection in &self.connections {
            self.lifecycle.attach(connection);
        }
        debug!(connections = self.connections.len(), "connections attached");
        self.inner.open()
    }

    /// Close the inner host (close and unsubscribe each proxy), then
    /// detach every connection.
    pub fn close(&self) {
        self.inner.close();
        for connection in &self.connections {
            self.lifecycle.detach(connection);
        }
        debug!(connections = self.connections.len(), "connections detached");
    }

    /// Current aggregate liveness.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    /// The host's liveness signal.
    #[must_use]
    pub fn events(&self) -> &Signal<ProxyEvent> {
        self.inner.events()
    }

    /// The factory-built connections, in proxy collection order.
    #[must_use]
    pub fn connections(&self) -> &[C] {
        &self.connections
    }

    /// Failover-first-success execution over the proxy set. See
    /// [`ProxyHost::execute`].
    pub fn execute<R, E>(
        &self,
        op: impl FnMut(&P) -> std::result::Result<R, E>,
    ) -> std::result::Result<R, HostError>
    where
        E: fmt::Display,
    {
        self.inner.execute(op)
    }

    /// All-must-succeed execution over the proxy set. See
    /// [`ProxyHost::execute_all`].
    pub fn execute_all<R, E>(
        &self,
        op: impl FnMut(&P) -> std::result::Result<R, E>,
    ) -> std::result::Result<Vec<R>, E> {
        self.inner.execute_all(op)
    }
}

impl<P: TransportProxy + ?Sized, C> fmt::Debug for ConnectionProxyHost<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProxyHost")
            .field("connections", &self.connections.len())
            .field("connected", &self.is_connected())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
