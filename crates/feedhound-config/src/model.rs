// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the feedhound forum watcher.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level feedhound configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedhoundConfig {
    /// Watcher identity and logging settings.
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// Monitored forum feed sources.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,

    /// Resilient page-fetch backoff settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// AI enrichment defaults (overridable at runtime through the settings store).
    #[serde(default)]
    pub enrich: EnrichConfig,

    /// Telegram delivery defaults (overridable at runtime through the settings store).
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Retention sweep settings.
    #[serde(default)]
    pub retention: RetentionConfig,
}

impl Default for FeedhoundConfig {
    fn default() -> Self {
        Self {
            watcher: WatcherConfig::default(),
            sources: default_sources(),
            fetch: FetchConfig::default(),
            enrich: EnrichConfig::default(),
            telegram: TelegramConfig::default(),
            storage: StorageConfig::default(),
            retention: RetentionConfig::default(),
        }
    }
}

/// Watcher identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WatcherConfig {
    /// Display name for logs and the test message.
    #[serde(default = "default_watcher_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Interval between scheduled pipeline invocations in `serve` mode.
    #[serde(default = "default_run_interval_secs")]
    pub run_interval_secs: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            name: default_watcher_name(),
            log_level: default_log_level(),
            run_interval_secs: default_run_interval_secs(),
        }
    }
}

fn default_watcher_name() -> String {
    "feedhound".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_run_interval_secs() -> u64 {
    1800 // 30 minutes
}

/// One monitored forum feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Short source name used in messages and hashtags.
    pub name: String,

    /// Feed document URL.
    pub feed_url: String,

    /// Emoji shown at the head of channel messages for this source.
    #[serde(default = "default_source_emoji")]
    pub emoji: String,
}

fn default_source_emoji() -> String {
    "📌".to_string()
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig {
            name: "nodeseek".to_string(),
            feed_url: "https://www.nodeseek.com/rss.xml".to_string(),
            emoji: "🟢".to_string(),
        },
        SourceConfig {
            name: "lowendtalk".to_string(),
            feed_url: "https://lowendtalk.com/discussions/feed.rss".to_string(),
            emoji: "🔵".to_string(),
        },
    ]
}

/// Resilient page-fetch configuration.
///
/// These knobs feed the fetcher's backoff policy; delays are jittered
/// uniformly within the configured bounds to reduce detectability.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Maximum fetch attempts per page.
    #[serde(default = "default_fetch_attempts")]
    pub attempts: u32,

    /// Lower bound of the randomized pre-attempt delay in milliseconds.
    #[serde(default = "default_pre_delay_min_ms")]
    pub pre_delay_min_ms: u64,

    /// Upper bound (exclusive) of the randomized pre-attempt delay.
    #[serde(default = "default_pre_delay_max_ms")]
    pub pre_delay_max_ms: u64,

    /// Lower bound of the inter-retry delay in milliseconds.
    #[serde(default = "default_retry_delay_min_ms")]
    pub retry_delay_min_ms: u64,

    /// Upper bound of the inter-retry delay in milliseconds.
    #[serde(default = "default_retry_delay_max_ms")]
    pub retry_delay_max_ms: u64,

    /// Bodies shorter than this are treated as block pages.
    #[serde(default = "default_min_body_len")]
    pub min_body_len: usize,

    /// Per-request timeout in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            attempts: default_fetch_attempts(),
            pre_delay_min_ms: default_pre_delay_min_ms(),
            pre_delay_max_ms: default_pre_delay_max_ms(),
            retry_delay_min_ms: default_retry_delay_min_ms(),
            retry_delay_max_ms: default_retry_delay_max_ms(),
            min_body_len: default_min_body_len(),
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_fetch_attempts() -> u32 {
    3
}

fn default_pre_delay_min_ms() -> u64 {
    1000
}

fn default_pre_delay_max_ms() -> u64 {
    3000
}

fn default_retry_delay_min_ms() -> u64 {
    3000
}

fn default_retry_delay_max_ms() -> u64 {
    5000
}

fn default_min_body_len() -> usize {
    1000
}

fn default_fetch_timeout_secs() -> u64 {
    20
}

/// AI enrichment configuration.
///
/// `provider`, `endpoint`, `api_key`, `model` and `prompt` are defaults only;
/// the settings store takes precedence once the admin layer writes values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnrichConfig {
    /// Provider name: "openai", "gemini" or "ollama".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Full endpoint URL for the provider's completion call.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key. `None` is acceptable for local providers.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier passed to the provider.
    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Prompt template; the post excerpt replaces the `{content}` placeholder.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Posts drained per pipeline invocation.
    #[serde(default = "default_enrich_batch")]
    pub batch_size: usize,

    /// Retry cap before a post is force-finalized without a summary.
    #[serde(default = "default_retry_cap")]
    pub retry_cap: i64,

    /// Delay between enriched posts in milliseconds (provider rate limits).
    #[serde(default = "default_post_delay_ms")]
    pub post_delay_ms: u64,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: default_endpoint(),
            api_key: None,
            model: default_ai_model(),
            prompt: default_prompt(),
            batch_size: default_enrich_batch(),
            retry_cap: default_retry_cap(),
            post_delay_ms: default_post_delay_ms(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_prompt() -> String {
    "请判断以下论坛帖子是否为促销信息，并用一句话总结。\
     严格按照如下格式回复：\n类型：促销 或 其他\n总结：一句话总结\n\n帖子内容：{content}"
        .to_string()
}

fn default_enrich_batch() -> usize {
    5
}

fn default_retry_cap() -> i64 {
    3
}

fn default_post_delay_ms() -> u64 {
    3000
}

/// Telegram delivery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables dispatch.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Target channel or chat identifier (e.g. "@mychannel" or a numeric id).
    #[serde(default)]
    pub chat_id: Option<String>,

    /// Summaries drained per pipeline invocation.
    #[serde(default = "default_dispatch_batch")]
    pub batch_size: usize,

    /// Delay between channel messages in milliseconds (Bot API rate limits).
    #[serde(default = "default_message_delay_ms")]
    pub message_delay_ms: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            batch_size: default_dispatch_batch(),
            message_delay_ms: default_message_delay_ms(),
        }
    }
}

fn default_dispatch_batch() -> usize {
    3
}

fn default_message_delay_ms() -> u64 {
    2000
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("feedhound").join("feedhound.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("feedhound.db"))
        .to_string_lossy()
        .into_owned()
}

/// Retention sweep configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionConfig {
    /// Posts and summaries older than this (by row creation time) are pruned.
    #[serde(default = "default_retention_days")]
    pub days: i64,

    /// Minimum hours between retention sweeps.
    #[serde(default = "default_cleanup_interval_hours")]
    pub cleanup_interval_hours: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            days: default_retention_days(),
            cleanup_interval_hours: default_cleanup_interval_hours(),
        }
    }
}

fn default_retention_days() -> i64 {
    7
}

fn default_cleanup_interval_hours() -> i64 {
    48
}
