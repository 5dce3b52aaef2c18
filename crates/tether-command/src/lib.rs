//! # tether-command
//!
//! Tracks in-flight command tasks and guarantees exactly-once
//! detachment when each task's single completion event fires.
//!
//! - [`CommandTask`] — one in-flight command unit with a single-fire
//!   completion signal
//! - [`CommandPipeline`] — subscribes before attaching, unsubscribes
//!   before detaching, and never reacts twice to the same task
//!
//! ## Crate Position
//!
//! Depends on `tether-core` for the observer registry, branded IDs, and
//! the lifecycle seam.

#![deny(unsafe_code)]

pub mod pipeline;
pub mod task;

pub use pipeline::CommandPipeline;
pub use task::CommandTask;
