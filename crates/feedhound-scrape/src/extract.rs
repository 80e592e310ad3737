// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content extraction from fetched forum pages.
//!
//! Tries forum post-body containers first, then generic structural elements,
//! and falls back to the page title. Returns an empty string when nothing
//! usable is found; callers treat empty as "no content", not as a failure.

use scraper::{Html, Selector};

/// Structural patterns tried in order. The first whose stripped text clears
/// [`MIN_CONTENT_LEN`] wins.
const CONTENT_SELECTORS: &[&str] = &[
    ".post-content",
    ".topic-content",
    ".message-content",
    ".Message",
    "article",
    "main",
];

/// Shorter matches are navigation chrome, not the post body.
const MIN_CONTENT_LEN: usize = 50;

/// Extracted content is capped before it reaches the AI prompt.
const MAX_CONTENT_LEN: usize = 1000;

pub fn extract_content(html: &str) -> String {
    let document = Html::parse_document(html);

    for pattern in CONTENT_SELECTORS {
        let selector = Selector::parse(pattern).unwrap();
        if let Some(element) = document.select(&selector).next() {
            let text = collapse(element.text());
            if text.chars().count() > MIN_CONTENT_LEN {
                return truncate(&text);
            }
        }
    }

    let title = Selector::parse("title").unwrap();
    if let Some(element) = document.select(&title).next() {
        let text = collapse(element.text());
        if !text.is_empty() {
            return truncate(&text);
        }
    }

    String::new()
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_CONTENT_LEN {
        let cut: String = text.chars().take(MAX_CONTENT_LEN).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_forum_body_container() {
        let html = r#"<html><body>
            <article>article text that is long enough to qualify but should lose out</article>
            <div class="post-content">forum post body text which is definitely long enough to pass the floor</div>
        </body></html>"#;
        let content = extract_content(html);
        assert!(content.starts_with("forum post body"), "got: {content}");
    }

    #[test]
    fn falls_through_short_containers() {
        let html = r#"<html><body>
            <div class="post-content">too short</div>
            <article>this article body is comfortably longer than fifty characters, so it qualifies</article>
        </body></html>"#;
        let content = extract_content(html);
        assert!(content.starts_with("this article body"), "got: {content}");
    }

    #[test]
    fn falls_back_to_title() {
        let html = "<html><head><title>VPS Deal Thread</title></head><body><p>hi</p></body></html>";
        assert_eq!(extract_content(html), "VPS Deal Thread");
    }

    #[test]
    fn empty_when_nothing_usable() {
        assert_eq!(extract_content("<html><body></body></html>"), "");
    }

    #[test]
    fn long_content_is_truncated_with_ellipsis() {
        let body = "word ".repeat(500);
        let html = format!(r#"<div class="post-content">{body}</div>"#);
        let content = extract_content(&html);
        assert!(content.ends_with("..."));
        assert_eq!(content.chars().count(), MAX_CONTENT_LEN + 3);
    }

    #[test]
    fn whitespace_is_collapsed() {
        let html = "<article>line one\n\n   line two\t\tstretched far enough past fifty characters now</article>";
        let content = extract_content(html);
        assert!(content.contains("line one line two"), "got: {content}");
    }
}
