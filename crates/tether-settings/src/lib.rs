//! # tether-settings
//!
//! Configuration for tether composition roots.
//!
//! Settings are loaded from two layers (in priority order):
//! 1. **Compiled defaults** — [`TetherSettings::default()`]
//! 2. **User file** — `~/.tether/settings.json` (deep-merged over
//!    defaults), plus `TETHER_LOG_LEVEL` as an environment override
//!
//! Loading returns a plain value. There is deliberately no process-wide
//! settings singleton: the composition root loads once and passes the
//! value (or the pieces it builds from it — proxy collections,
//! predicates) down explicitly.
//!
//! # Usage
//!
//! ```no_run
//! use tether_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("endpoints: {}", settings.client.endpoints.len());
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, deep_merge, load_settings, load_settings_from_path, settings_path,
};
pub use types::*;
