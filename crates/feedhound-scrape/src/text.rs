// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text normalization for feed fields.

use scraper::Html;

/// Strips markup, CDATA wrappers and HTML entities from a feed text field,
/// collapsing whitespace. Feed descriptions arrive as HTML fragments more
/// often than not.
pub fn clean_fragment(raw: &str) -> String {
    let unwrapped = raw
        .trim()
        .trim_start_matches("<![CDATA[")
        .trim_end_matches("]]>");

    let fragment = Html::parse_fragment(unwrapped);
    fragment
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
