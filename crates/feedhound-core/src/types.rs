// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the feedhound workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Classification of an enriched post. Closed two-value set.
///
/// Displays as the localized label stored in the database and shown in
/// channel messages ("促销" / "其他"); parsing accepts both the localized
/// labels and the English aliases the AI backends occasionally emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum PostType {
    #[strum(to_string = "促销", serialize = "promotional")]
    Promotional,
    #[strum(to_string = "其他", serialize = "other")]
    Other,
}

/// One discovered forum post, as persisted.
///
/// `link` is unique for the lifetime of the dataset; duplicate ingestion is
/// a no-op. `processed` and `retry_count` drive the enrichment state
/// machine — see [`PostOutcome`] for the derived lifecycle reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub source: String,
    pub title: String,
    pub author: Option<String>,
    /// ISO-8601 publish timestamp; defaults to discovery time when the feed
    /// gave none or an unparseable one.
    pub published_at: String,
    /// Body excerpt from the feed, possibly empty or very short.
    pub content: String,
    pub link: String,
    pub processed: bool,
    pub retry_count: i64,
    pub created_at: String,
}

/// The enrichment result for exactly one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,
    pub post_id: i64,
    pub summary: String,
    /// Localized classification label ("促销" / "其他").
    pub post_type: String,
    pub sent_to_channel: bool,
    pub created_at: String,
}

/// Explicit lifecycle state of a post, derived from the persisted
/// flag+counter pair plus summary presence.
///
/// The terminal variants are distinguishable so logs and tests can assert
/// on the *reason* a post stopped being eligible, not just the boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    /// Not yet processed; eligible for the next enrichment drain.
    Pending,
    /// Processed with a summary row.
    Enriched,
    /// Force-finalized after exhausting the retry cap; no summary.
    Exhausted,
    /// Finalized because no content could be obtained; no summary.
    NoContent,
}

/// One structured item parsed out of a feed document, not yet persisted.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub source: String,
    pub title: String,
    pub link: String,
    pub author: Option<String>,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub excerpt: String,
}

/// Normalized result of one AI enrichment call, independent of provider
/// wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub post_type: PostType,
    pub summary: String,
}

/// Aggregate counters exposed to the administrative layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_posts: i64,
    pub pending_posts: i64,
    pub total_summaries: i64,
    pub unsent_summaries: i64,
}

/// Mutable AI backend settings, read through the settings store with
/// config-supplied defaults for absent keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSettings {
    /// Provider name: "openai", "gemini" or "ollama".
    pub provider: String,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    /// Prompt template containing the `{content}` placeholder.
    pub prompt: String,
}

/// Mutable channel settings, read through the settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSettings {
    pub bot_token: String,
    pub chat_id: String,
}
