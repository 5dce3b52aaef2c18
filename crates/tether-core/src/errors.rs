//! Transport error types.

use thiserror::Error;

/// Errors surfaced by transport proxies and service hosts.
///
/// The framework does not own any transport; this type is the contract
/// an implementation reports open failures through.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Underlying I/O failure while opening or using the transport.
    #[error("transport i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The remote end (or the transport stack) refused the open.
    #[error("transport rejected open: {0}")]
    Rejected(String),
    /// The transport was already closed or aborted.
    #[error("transport closed")]
    Closed,
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
