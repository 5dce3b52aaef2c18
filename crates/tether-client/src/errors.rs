//! Error types for the client-side connection hosts.

use thiserror::Error;

/// Errors raised by [`ProxyHost`](crate::ProxyHost) and
/// [`ConnectionProxyHost`](crate::ConnectionProxyHost).
#[derive(Debug, Error)]
pub enum HostError {
    /// Every proxy in the set failed a failover attempt. The individual
    /// per-proxy errors are swallowed by design; only the exhaustion is
    /// signaled. Callers treat this as "operation unavailable on any
    /// channel".
    #[error("no transport accepted the operation ({attempts} attempts)")]
    Exhausted {
        /// How many proxies were tried (the full collection, in order).
        attempts: usize,
    },

    /// The connection factory produced no connection for a proxy during
    /// host construction. Fatal: no partial host state is retained.
    #[error("connection factory produced no connection for proxy {index}")]
    FactoryFailed {
        /// Zero-based position of the offending proxy in the collection.
        index: usize,
    },
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, HostError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_display() {
        let err = HostError::Exhausted { attempts: 3 };
        assert_eq!(err.to_string(), "no transport accepted the operation (3 attempts)");
    }

    #[test]
    fn factory_failed_display() {
        let err = HostError::FactoryFailed { index: 1 };
        assert_eq!(
            err.to_string(),
            "connection factory produced no connection for proxy 1"
        );
    }
}
