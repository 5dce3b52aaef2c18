//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the JSON
//! wire format. Each type implements [`Default`] with production default
//! values, and `#[serde(default)]` allows partial JSON — missing fields
//! get their default value during deserialization.

use serde::{Deserialize, Serialize};
use tether_core::{all_connected, any_connected, ConnectedPredicate, TransportProxy};

/// Root settings type for a tether composition root.
///
/// Loaded from `~/.tether/settings.json` with defaults applied for
/// missing fields. `TETHER_LOG_LEVEL` overrides the logging level.
///
/// # JSON Format
///
/// All field names are camelCase. Example:
///
/// ```json
/// {
///   "version": "0.1.0",
///   "name": "tether",
///   "client": {
///     "endpoints": [{ "name": "primary", "address": "10.0.0.1:7420" }],
///     "policy": "any"
///   }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TetherSettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Client-side proxy host settings.
    pub client: ClientSettings,
    /// Server-side host settings.
    pub server: ServerSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for TetherSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "tether".to_string(),
            client: ClientSettings::default(),
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl TetherSettings {
    /// Clamp out-of-range values to their nearest valid setting,
    /// logging a warning for each adjustment.
    pub fn validate(&mut self) {
        if self.client.heartbeat_interval_ms == 0 {
            tracing::warn!(
                "heartbeatIntervalMs of 0 is invalid, using default of {}",
                default_heartbeat_interval_ms()
            );
            self.client.heartbeat_interval_ms = default_heartbeat_interval_ms();
        }
    }
}

/// Client-side proxy host settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    /// The endpoints a proxy host fans out over.
    pub endpoints: Vec<EndpointSettings>,
    /// Aggregate-liveness policy derived over the endpoint proxies.
    pub policy: ConnectPolicy,
    /// Interval between heartbeat probes, in milliseconds.
    pub heartbeat_interval_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            policy: ConnectPolicy::default(),
            heartbeat_interval_ms: default_heartbeat_interval_ms(),
        }
    }
}

fn default_heartbeat_interval_ms() -> u64 {
    5000
}

/// One remote endpoint a transport proxy connects to.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointSettings {
    /// Human-readable endpoint name.
    pub name: String,
    /// Network address of the endpoint.
    pub address: String,
    /// Whether the composition root should build a proxy for this endpoint.
    pub enabled: bool,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            enabled: true,
        }
    }
}

/// How per-proxy liveness folds into the host's aggregate flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectPolicy {
    /// Connected iff at least one proxy is live.
    #[default]
    Any,
    /// Connected iff every proxy is live.
    All,
}

impl ConnectPolicy {
    /// The liveness predicate this policy names.
    #[must_use]
    pub fn predicate<P: TransportProxy + ?Sized>(self) -> ConnectedPredicate<P> {
        match self {
            Self::Any => any_connected(),
            Self::All => all_connected(),
        }
    }
}

/// Server-side host settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Address the service host listens on.
    pub listen_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:7420".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Log level filter: `error`, `warn`, `info`, `debug`, or `trace`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
