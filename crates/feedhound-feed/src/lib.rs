// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feed ingestion for the feedhound watcher: fetch an RSS/Atom document and
//! turn it into source-tagged [`feedhound_core::FeedItem`]s.

pub mod fetch;
pub mod parse;

pub use fetch::FeedFetcher;
pub use parse::parse_feed;
