//! Generic attach/detach seam.
//!
//! [`Lifecycle`] is the hook pair invoked when a logical resource
//! becomes available or unavailable: per-proxy connections on the
//! client side, peer sessions on the server side, and in-flight command
//! tasks in the command pipeline all flow through it. Injecting it as a
//! value replaces the subclass-override pattern the design grew out of.

/// Paired hooks driven by a host when a tracked item arrives or leaves.
///
/// Implementations must tolerate being called from transport-owned
/// threads; the framework never calls `attach`/`detach` for the same
/// item concurrently with itself.
pub trait Lifecycle<T>: Send + Sync {
    /// The item is now available / tracked.
    fn attach(&self, item: &T);

    /// The item is no longer available / tracked.
    fn detach(&self, item: &T);
}

/// Build a [`Lifecycle`] from two closures.
pub struct FnLifecycle<A, D> {
    attach: A,
    detach: D,
}

impl<A, D> FnLifecycle<A, D> {
    /// Wrap an attach and a detach closure.
    pub fn new(attach: A, detach: D) -> Self {
        Self { attach, detach }
    }
}

impl<T, A, D> Lifecycle<T> for FnLifecycle<A, D>
where
    A: Fn(&T) + Send + Sync,
    D: Fn(&T) + Send + Sync,
{
    fn attach(&self, item: &T) {
        (self.attach)(item);
    }

    fn detach(&self, item: &T) {
        (self.detach)(item);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
