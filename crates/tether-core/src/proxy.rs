//! Transport proxy capability trait and liveness events.
//!
//! A [`TransportProxy`] is one externally-owned connection attempt. The
//! framework opens and closes proxies but never creates or destroys
//! them; composition roots supply the fixed proxy collection.

use crate::errors::Result;
use crate::ids::ProxyId;
use crate::signal::Signal;

/// Liveness notification raised by a proxy (and re-raised by hosts).
///
/// Carries no payload beyond identity: subscribers that need the source
/// capture it in their closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProxyEvent {
    /// The connection became live.
    Connected,
    /// The connection was lost.
    Disconnected,
    /// The connection's periodic liveness pulse.
    Heartbeating,
}

/// One transport connection attempt.
///
/// Implementations own the actual wire transport and deliver
/// [`ProxyEvent`]s on their own threads via [`events`](Self::events).
/// `open` may fail; `close` is unconditional best-effort teardown.
pub trait TransportProxy: Send + Sync {
    /// Stable identity of this proxy, for logging and diagnostics.
    fn id(&self) -> &ProxyId;

    /// Whether the underlying transport currently reports live.
    fn is_connected(&self) -> bool;

    /// Start connecting. Errors propagate to the caller.
    fn open(&self) -> Result<()>;

    /// Tear down unconditionally. Never fails.
    fn close(&self);

    /// The proxy's liveness event signal.
    fn events(&self) -> &Signal<ProxyEvent>;
}
