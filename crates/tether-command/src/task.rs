//! One in-flight command unit.

use std::sync::atomic::{AtomicBool, Ordering};
use tether_core::{CommandId, Signal};

/// A command dispatched over the transport, tracked until its single
/// completion event fires.
///
/// The task does not carry command content; it is the unit of
/// completion tracking. The pipeline holds only a transient
/// subscription to [`completed`](Self::completed) for the task's
/// in-flight lifetime.
pub struct CommandTask {
    id: CommandId,
    completed: Signal<CommandId>,
    fired: AtomicBool,
}

impl CommandTask {
    /// Create a task with a fresh [`CommandId`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(CommandId::new())
    }

    /// Create a task with a caller-supplied ID.
    #[must_use]
    pub fn with_id(id: CommandId) -> Self {
        Self {
            id,
            completed: Signal::new(),
            fired: AtomicBool::new(false),
        }
    }

    /// The task's identity.
    #[must_use]
    pub fn id(&self) -> &CommandId {
        &self.id
    }

    /// The completion signal. Fires at most once, carrying the task ID.
    #[must_use]
    pub fn completed(&self) -> &Signal<CommandId> {
        &self.completed
    }

    /// Mark the command finished, firing the completion signal.
    ///
    /// Returns whether this call fired the signal; repeated calls are
    /// no-ops and return `false`.
    pub fn complete(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.completed.emit(&self.id);
        true
    }

    /// Whether the completion signal has fired.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Default for CommandTask {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
