//! Hand-rolled fakes shared by the host test modules.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tether_core::{ProxyEvent, ProxyId, Signal, TransportError, TransportProxy};

/// Shared, ordered record of observable actions (opens, closes,
/// attaches, detaches) used to pin ordering guarantees.
pub type ActionLog = Arc<Mutex<Vec<String>>>;

/// A controllable in-memory [`TransportProxy`].
///
/// Tests flip liveness with [`connect`](Self::connect) /
/// [`disconnect`](Self::disconnect) and pulse with
/// [`heartbeat`](Self::heartbeat); each helper updates the flag and then
/// fires the corresponding event, the way a real transport thread would.
pub struct FakeProxy {
    id: ProxyId,
    name: String,
    connected: AtomicBool,
    fail_open: AtomicBool,
    open_calls: AtomicUsize,
    close_calls: AtomicUsize,
    events: Signal<ProxyEvent>,
    log: Option<ActionLog>,
}

impl FakeProxy {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            id: ProxyId::new(),
            name: name.to_owned(),
            connected: AtomicBool::new(false),
            fail_open: AtomicBool::new(false),
            open_calls: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
            events: Signal::new(),
            log: None,
        })
    }

    /// A fake that records its `open`/`close` calls into a shared log.
    pub fn with_log(name: &str, log: ActionLog) -> Arc<Self> {
        Arc::new(Self {
            id: ProxyId::new(),
            name: name.to_owned(),
            connected: AtomicBool::new(false),
            fail_open: AtomicBool::new(false),
            open_calls: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
            events: Signal::new(),
            log: Some(log),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fail_next_open(&self) {
        self.fail_open.store(true, Ordering::SeqCst);
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    pub fn connect(&self) {
        self.connected.store(true, Ordering::SeqCst);
        self.events.emit(&ProxyEvent::Connected);
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
        self.events.emit(&ProxyEvent::Disconnected);
    }

    pub fn heartbeat(&self) {
        self.events.emit(&ProxyEvent::Heartbeating);
    }
}

impl TransportProxy for FakeProxy {
    fn id(&self) -> &ProxyId {
        &self.id
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn open(&self) -> tether_core::Result<()> {
        let _ = self.open_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.log {
            log.lock().push(format!("open {}", self.name));
        }
        if self.fail_open.swap(false, Ordering::SeqCst) {
            return Err(TransportError::Rejected(format!("{} unavailable", self.name)));
        }
        Ok(())
    }

    fn close(&self) {
        let _ = self.close_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.log {
            log.lock().push(format!("close {}", self.name));
        }
        self.connected.store(false, Ordering::SeqCst);
    }

    fn events(&self) -> &Signal<ProxyEvent> {
        &self.events
    }
}
