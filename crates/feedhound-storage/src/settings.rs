// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached, typed access to the mutable settings store.
//!
//! The admin layer writes settings at any time; the pipeline reads them on
//! every invocation. A per-key value+timestamp cache keeps the hot path off
//! the database, with an explicit invalidate-on-write rule.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use feedhound_config::model::{EnrichConfig, TelegramConfig};
use feedhound_core::{AiSettings, ChannelSettings, FeedhoundError};
use tokio::sync::Mutex;
use tracing::debug;

use crate::database::Database;
use crate::queries::settings as raw;

/// Settings keys. Absent keys fall back to config-file defaults.
pub mod keys {
    pub const AI_PROVIDER: &str = "ai_provider";
    pub const AI_ENDPOINT: &str = "ai_endpoint";
    pub const AI_API_KEY: &str = "ai_api_key";
    pub const AI_MODEL: &str = "ai_model";
    pub const AI_PROMPT: &str = "ai_prompt";
    pub const TG_BOT_TOKEN: &str = "tg_bot_token";
    pub const TG_CHAT_ID: &str = "tg_chat_id";
    pub const LAST_CLEANUP_AT: &str = "last_cleanup_at";
}

/// How long a cached value is served before the store is re-consulted.
const CACHE_TTL: Duration = Duration::from_secs(60);

struct CachedValue {
    /// `None` caches key absence too.
    value: Option<String>,
    fetched_at: Instant,
}

/// Cached facade over the `settings` table.
pub struct SettingsStore {
    db: Database,
    cache: Mutex<HashMap<String, CachedValue>>,
}

impl SettingsStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Read a setting, falling back to `default` when the key is absent.
    pub async fn get(&self, key: &str, default: &str) -> Result<String, FeedhoundError> {
        Ok(self
            .get_opt(key)
            .await?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Read a setting without a default.
    pub async fn get_opt(&self, key: &str) -> Result<Option<String>, FeedhoundError> {
        {
            let cache = self.cache.lock().await;
            if let Some(cached) = cache.get(key) {
                if cached.fetched_at.elapsed() < CACHE_TTL {
                    return Ok(cached.value.clone());
                }
            }
        }

        let value = raw::get(&self.db, key).await?;
        let mut cache = self.cache.lock().await;
        cache.insert(
            key.to_string(),
            CachedValue {
                value: value.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(value)
    }

    /// Write a setting and invalidate its cache entry.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), FeedhoundError> {
        raw::set(&self.db, key, value).await?;
        self.cache.lock().await.remove(key);
        debug!(key, "setting updated");
        Ok(())
    }

    /// Effective AI settings: stored values with config-file defaults.
    pub async fn ai_settings(&self, defaults: &EnrichConfig) -> Result<AiSettings, FeedhoundError> {
        Ok(AiSettings {
            provider: self.get(keys::AI_PROVIDER, &defaults.provider).await?,
            endpoint: self.get(keys::AI_ENDPOINT, &defaults.endpoint).await?,
            api_key: self
                .get(keys::AI_API_KEY, defaults.api_key.as_deref().unwrap_or(""))
                .await?,
            model: self.get(keys::AI_MODEL, &defaults.model).await?,
            prompt: self.get(keys::AI_PROMPT, &defaults.prompt).await?,
        })
    }

    pub async fn set_ai_settings(&self, settings: &AiSettings) -> Result<(), FeedhoundError> {
        self.set(keys::AI_PROVIDER, &settings.provider).await?;
        self.set(keys::AI_ENDPOINT, &settings.endpoint).await?;
        self.set(keys::AI_API_KEY, &settings.api_key).await?;
        self.set(keys::AI_MODEL, &settings.model).await?;
        self.set(keys::AI_PROMPT, &settings.prompt).await?;
        Ok(())
    }

    /// Effective channel settings: stored values with config-file defaults.
    pub async fn channel_settings(
        &self,
        defaults: &TelegramConfig,
    ) -> Result<ChannelSettings, FeedhoundError> {
        Ok(ChannelSettings {
            bot_token: self
                .get(
                    keys::TG_BOT_TOKEN,
                    defaults.bot_token.as_deref().unwrap_or(""),
                )
                .await?,
            chat_id: self
                .get(keys::TG_CHAT_ID, defaults.chat_id.as_deref().unwrap_or(""))
                .await?,
        })
    }

    pub async fn set_channel_settings(
        &self,
        settings: &ChannelSettings,
    ) -> Result<(), FeedhoundError> {
        self.set(keys::TG_BOT_TOKEN, &settings.bot_token).await?;
        self.set(keys::TG_CHAT_ID, &settings.chat_id).await?;
        Ok(())
    }

    /// When the last retention sweep ran, if ever.
    pub async fn last_cleanup_at(
        &self,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>, FeedhoundError> {
        Ok(self
            .get_opt(keys::LAST_CLEANUP_AT)
            .await?
            .and_then(|raw| chrono::DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc)))
    }

    pub async fn record_cleanup_now(&self) -> Result<(), FeedhoundError> {
        let now = chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string();
        self.set(keys::LAST_CLEANUP_AT, &now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup() -> (SettingsStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("settings.db").to_str().unwrap())
            .await
            .unwrap();
        (SettingsStore::new(db), dir)
    }

    #[tokio::test]
    async fn absent_key_falls_back_to_default() {
        let (store, _dir) = setup().await;
        assert_eq!(
            store.get(keys::AI_MODEL, "gpt-4o-mini").await.unwrap(),
            "gpt-4o-mini"
        );
    }

    #[tokio::test]
    async fn write_invalidates_the_cache() {
        let (store, _dir) = setup().await;

        // Prime the cache with the absent-key result.
        assert_eq!(store.get(keys::AI_PROVIDER, "openai").await.unwrap(), "openai");

        // A write must be visible immediately, not after the TTL.
        store.set(keys::AI_PROVIDER, "ollama").await.unwrap();
        assert_eq!(store.get(keys::AI_PROVIDER, "openai").await.unwrap(), "ollama");
    }

    #[tokio::test]
    async fn ai_settings_merge_stored_over_defaults() {
        let (store, _dir) = setup().await;
        let defaults = EnrichConfig::default();

        store.set(keys::AI_MODEL, "qwen2.5").await.unwrap();
        let settings = store.ai_settings(&defaults).await.unwrap();
        assert_eq!(settings.model, "qwen2.5");
        assert_eq!(settings.provider, defaults.provider);
        assert_eq!(settings.prompt, defaults.prompt);
    }

    #[tokio::test]
    async fn cleanup_timestamp_round_trips() {
        let (store, _dir) = setup().await;
        assert!(store.last_cleanup_at().await.unwrap().is_none());

        store.record_cleanup_now().await.unwrap();
        let at = store.last_cleanup_at().await.unwrap().unwrap();
        assert!((chrono::Utc::now() - at).num_seconds() < 5);
    }
}
