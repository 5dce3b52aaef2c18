//! # tether-server
//!
//! Server-side counterpart to the client connection hosts: host inbound
//! transport connections and drive a per-peer attach/detach lifecycle
//! scoped to each peer session.
//!
//! - [`ResourceRegistry`] — keyed association of logical resources to a
//!   physical host identity, so multiple logical services can share one
//!   transport host
//! - [`PeerMediator`] — topic for per-peer connect/disconnect
//!   notifications, routed by explicit host and session keys
//! - [`PeerHostAdapter`] — registers against the registry, opens the
//!   underlying service host, and translates peer liveness into
//!   lifecycle hook calls
//!
//! ## Crate Position
//!
//! Depends on `tether-core` for IDs, the observer registry, and the
//! lifecycle seam.

#![deny(unsafe_code)]

pub mod adapter;
pub mod mediator;
pub mod registry;

pub use adapter::{PeerHostAdapter, ServiceHost};
pub use mediator::{PeerEvent, PeerEventKind, PeerMediator};
pub use registry::{Resource, ResourceRegistry};
