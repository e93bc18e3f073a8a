// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./herdlink.toml` > `~/.config/herdlink/herdlink.toml`
//! > `/etc/herdlink/herdlink.toml` with environment variable overrides via the
//! `HERDLINK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HerdlinkConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/herdlink/herdlink.toml` (system-wide)
/// 3. `~/.config/herdlink/herdlink.toml` (user XDG config)
/// 4. `./herdlink.toml` (local directory)
/// 5. `HERDLINK_*` environment variables
pub fn load_config() -> Result<HerdlinkConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HerdlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HerdlinkConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HerdlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HerdlinkConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HerdlinkConfig::default()))
        .merge(Toml::file("/etc/herdlink/herdlink.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("herdlink/herdlink.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("herdlink.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HERDLINK_GATEWAY_ADMIN_CODE` must map
/// to `gateway.admin_code`, not `gateway.admin.code`.
fn env_provider() -> Env {
    Env::prefixed("HERDLINK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: HERDLINK_STORE_DATABASE_PATH -> "store_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("store_", "store.", 1)
            .replacen("push_", "push.", 1)
            .replacen("triggers_", "triggers.", 1);
        mapped.into()
    })
}
