// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parses raw model output into a classification + summary.
//!
//! Models are prompted for labeled bilingual output ("类型: ..." / "总结: ...")
//! but often free-wheel. Parsing degrades instead of failing: missing labels
//! fall back to keyword classification over the raw text, and the raw text
//! itself becomes the summary.

use std::sync::LazyLock;

use feedhound_core::{Enrichment, PostType};
use regex::Regex;

static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:类型|type)\s*[:：]\s*([^\r\n]+)").unwrap());

static SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)(?:总结|summary)\s*[:：]\s*(.+)").unwrap());

/// Substrings that mark a post as promotional when the model skipped labels.
const PROMO_KEYWORDS: &[&str] = &[
    "促销", "优惠", "折扣", "特价", "discount", "promo", "deal", "offer", "sale", "coupon",
];

/// Never fails: any non-empty model output maps to some enrichment.
pub fn parse_enrichment(raw: &str) -> Enrichment {
    let raw = raw.trim();

    let type_label = TYPE_RE
        .captures(raw)
        .map(|c| c[1].trim().to_string());
    let summary = SUMMARY_RE
        .captures(raw)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty());

    if let (Some(label), Some(summary)) = (type_label, summary) {
        if let Some(post_type) = classify_label(&label) {
            return Enrichment { post_type, summary };
        }
    }

    // Labels missing, partial, or outside the known set: classify the whole
    // text by keyword and keep it verbatim as the summary.
    Enrichment {
        post_type: classify_keywords(raw),
        summary: raw.to_string(),
    }
}

/// Maps a labeled type onto the closed set, `None` for anything else.
fn classify_label(label: &str) -> Option<PostType> {
    let lowered = label.to_lowercase();
    if lowered.contains("促销") || lowered.contains("promotion") || lowered.contains("promo") {
        Some(PostType::Promotional)
    } else if lowered.contains("其他") || lowered.contains("other") {
        Some(PostType::Other)
    } else {
        None
    }
}

fn classify_keywords(text: &str) -> PostType {
    let lowered = text.to_lowercase();
    if PROMO_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        PostType::Promotional
    } else {
        PostType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_chinese_output_parses() {
        let parsed = parse_enrichment("类型：促销\n总结：2核4G，月付5美元");
        assert_eq!(parsed.post_type, PostType::Promotional);
        assert_eq!(parsed.summary, "2核4G，月付5美元");
    }

    #[test]
    fn labeled_english_output_parses() {
        let parsed = parse_enrichment("Type: other\nSummary: a question about DNS setup");
        assert_eq!(parsed.post_type, PostType::Other);
        assert_eq!(parsed.summary, "a question about DNS setup");
    }

    #[test]
    fn multiline_summary_is_kept_whole() {
        let parsed = parse_enrichment("类型: 其他\n总结: line one\nline two");
        assert_eq!(parsed.summary, "line one\nline two");
    }

    #[test]
    fn unlabeled_discount_text_falls_back_to_promotional() {
        let raw = "Huge discount on yearly plans this weekend";
        let parsed = parse_enrichment(raw);
        assert_eq!(parsed.post_type, PostType::Promotional);
        assert_eq!(parsed.summary, raw);
    }

    #[test]
    fn unlabeled_neutral_text_falls_back_to_other() {
        let raw = "How do I migrate my mail server?";
        let parsed = parse_enrichment(raw);
        assert_eq!(parsed.post_type, PostType::Other);
        assert_eq!(parsed.summary, raw);
    }

    #[test]
    fn out_of_set_type_label_degrades_to_keyword_fallback() {
        let raw = "类型：新闻\n总结：五折优惠促销";
        let parsed = parse_enrichment(raw);
        assert_eq!(parsed.post_type, PostType::Promotional);
        assert_eq!(parsed.summary, raw);
    }

    #[test]
    fn type_label_alone_still_uses_fallback() {
        let raw = "类型：促销";
        let parsed = parse_enrichment(raw);
        assert_eq!(parsed.post_type, PostType::Promotional);
        assert_eq!(parsed.summary, raw);
    }
}
