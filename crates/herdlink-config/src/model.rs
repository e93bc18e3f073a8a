// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Herdlink notification service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Herdlink configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HerdlinkConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Document store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Push sender settings.
    #[serde(default)]
    pub push: PushConfig,

    /// Document trigger settings.
    #[serde(default)]
    pub triggers: TriggerConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service instance.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "herdlink".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// The one value accepted by the admin-code validation endpoint.
    ///
    /// The endpoint is unauthenticated and unthrottled -- a known weakness
    /// of the upstream system, preserved here because fixing it belongs to
    /// the identity layer, not this service. `None` disables validation
    /// (every submitted code is reported invalid).
    #[serde(default)]
    pub admin_code: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_code: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "herdlink.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Push sender configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PushConfig {
    /// Endpoint of the push delivery transport.
    #[serde(default = "default_push_api_url")]
    pub api_url: String,

    /// Server key credential. `None` disables push delivery.
    #[serde(default)]
    pub server_key: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_push_timeout")]
    pub timeout_secs: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            api_url: default_push_api_url(),
            server_key: None,
            timeout_secs: default_push_timeout(),
        }
    }
}

fn default_push_api_url() -> String {
    "https://fcm.googleapis.com/fcm/send".to_string()
}

fn default_push_timeout() -> u64 {
    30
}

/// Document trigger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerConfig {
    /// Enable the document trigger engine.
    #[serde(default = "default_triggers_enabled")]
    pub enabled: bool,

    /// Capacity of the document event feed. When the feed is full, events
    /// are dropped with a warning rather than blocking store writes.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            enabled: default_triggers_enabled(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_triggers_enabled() -> bool {
    true
}

fn default_queue_capacity() -> usize {
    256
}
