// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./feedhound.toml` > `~/.config/feedhound/feedhound.toml`
//! > `/etc/feedhound/feedhound.toml` with environment variable overrides via
//! `FEEDHOUND_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FeedhoundConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/feedhound/feedhound.toml` (system-wide)
/// 3. `~/.config/feedhound/feedhound.toml` (user XDG config)
/// 4. `./feedhound.toml` (local directory)
/// 5. `FEEDHOUND_*` environment variables
pub fn load_config() -> Result<FeedhoundConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FeedhoundConfig::default()))
        .merge(Toml::file("/etc/feedhound/feedhound.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("feedhound/feedhound.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("feedhound.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<FeedhoundConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FeedhoundConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FeedhoundConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FeedhoundConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `FEEDHOUND_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("FEEDHOUND_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: FEEDHOUND_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("watcher_", "watcher.", 1)
            .replacen("fetch_", "fetch.", 1)
            .replacen("enrich_", "enrich.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("retention_", "retention.", 1);
        mapped.into()
    })
}
