//! # tether-core
//!
//! Foundation types for the tether connection-lifecycle framework.
//!
//! This crate provides the shared vocabulary the other tether crates
//! depend on:
//!
//! - **Branded IDs**: [`ids::ProxyId`], [`ids::HostId`], [`ids::SessionKey`],
//!   [`ids::CommandId`] as newtypes
//! - **Observer registry**: [`signal::Signal`] with ordered subscribers and
//!   idempotent unsubscription
//! - **Transport capability**: [`proxy::TransportProxy`] trait and
//!   [`proxy::ProxyEvent`] liveness events
//! - **Liveness predicates**: [`predicate::any_connected`],
//!   [`predicate::all_connected`]
//! - **Attach/detach seam**: [`lifecycle::Lifecycle`] trait
//! - **Errors**: [`errors::TransportError`] via `thiserror`
//! - **Logging**: [`logging::init_subscriber`] for tracing setup
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other tether crates.

#![deny(unsafe_code)]

pub mod errors;
pub mod ids;
pub mod lifecycle;
pub mod logging;
pub mod predicate;
pub mod proxy;
pub mod signal;

pub use errors::{Result, TransportError};
pub use ids::{CommandId, HostId, ProxyId, SessionKey};
pub use lifecycle::{FnLifecycle, Lifecycle};
pub use predicate::{ConnectedPredicate, all_connected, any_connected};
pub use proxy::{ProxyEvent, TransportProxy};
pub use signal::{Signal, SubscriberId};
