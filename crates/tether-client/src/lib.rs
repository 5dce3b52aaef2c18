//! # tether-client
//!
//! Client-side connection hosts: aggregate N redundant transport
//! proxies into one logical connection with a derived liveness flag,
//! transition-only notification, heartbeat gating, and two execution
//! strategies over the proxy set:
//!
//! - [`ProxyHost::execute`] — failover, first success wins
//! - [`ProxyHost::execute_all`] — all must succeed, first failure aborts
//!
//! [`ConnectionProxyHost`] extends the pattern one level: a factory
//! builds one richer connection object per proxy, and the host drives
//! each connection's attach/detach in lockstep with proxy lifecycle.
//!
//! ## Crate Position
//!
//! Depends on `tether-core` for the proxy capability trait, predicates,
//! the observer registry, and the lifecycle seam.

#![deny(unsafe_code)]

pub mod connection_host;
pub mod errors;
pub mod host;

pub use connection_host::ConnectionProxyHost;
pub use errors::{HostError, Result};
pub use host::ProxyHost;

#[cfg(test)]
pub(crate) mod testing;
