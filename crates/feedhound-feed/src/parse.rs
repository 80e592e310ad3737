// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feed document parsing.
//!
//! A malformed document is an error; a malformed item is not. Items missing
//! a title or link are skipped silently so one broken entry never sinks the
//! rest of the feed.

use chrono::Utc;
use feed_rs::parser;
use feedhound_core::{FeedItem, FeedhoundError};
use feedhound_scrape::clean_fragment;
use tracing::debug;

/// Parses an RSS/Atom document into feed items tagged with `source`.
pub fn parse_feed(source: &str, raw: &[u8]) -> Result<Vec<FeedItem>, FeedhoundError> {
    let feed = parser::parse(raw).map_err(|e| FeedhoundError::Retrieval {
        message: format!("failed to parse feed for {source}: {e}"),
        source: Some(Box::new(e)),
    })?;

    let total = feed.entries.len();
    let items: Vec<FeedItem> = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = clean_fragment(&entry.title.as_ref()?.content);
            if title.is_empty() {
                return None;
            }
            let link = entry.links.first()?.href.clone();

            let author = entry
                .authors
                .first()
                .map(|person| clean_fragment(&person.name))
                .filter(|name| !name.is_empty());

            // Unparseable or absent dates default to now so new items are
            // never dropped by the freshness window.
            let published_at = entry
                .published
                .or(entry.updated)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now);

            let excerpt = entry
                .summary
                .as_ref()
                .map(|text| clean_fragment(&text.content))
                .or_else(|| {
                    entry
                        .content
                        .as_ref()
                        .and_then(|c| c.body.as_deref())
                        .map(clean_fragment)
                })
                .unwrap_or_default();

            Some(FeedItem {
                source: source.to_string(),
                title,
                link,
                author,
                published_at,
                excerpt,
            })
        })
        .collect();

    debug!(source, total, usable = items.len(), "feed parsed");
    Ok(items)
}
