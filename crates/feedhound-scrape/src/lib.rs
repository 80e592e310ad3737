// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page retrieval for the feedhound watcher.
//!
//! Feed excerpts are often too thin to classify, so the pipeline fetches the
//! full forum page. This crate provides the retry-capable [`PageFetcher`],
//! the post-body [`extract::extract_content`] pass, and the plain-text
//! normalizer shared with feed parsing.

pub mod backoff;
pub mod extract;
pub mod fetch;
pub mod text;

pub use backoff::BackoffPolicy;
pub use extract::extract_content;
pub use fetch::PageFetcher;
pub use text::clean_fragment;
