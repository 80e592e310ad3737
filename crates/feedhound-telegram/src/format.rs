// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML message formatting for the channel.
//!
//! One fixed template per summary: emoji + source + classification header,
//! labeled lines, a typed hyperlink and a hashtag line. Interpolated text is
//! HTML-escaped; the link goes into an `href` attribute unescaped as text.

use feedhound_storage::models::UnsentSummary;

/// Shown when the owning post was pruned before its summary was sent.
const MISSING_FIELD: &str = "未知";

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders one summary into the channel message body.
pub fn format_message(item: &UnsentSummary, emoji: &str) -> String {
    let source = item.source.as_deref().unwrap_or(MISSING_FIELD);
    let title = item.title.as_deref().unwrap_or(MISSING_FIELD);
    let author = item.author.as_deref().unwrap_or(MISSING_FIELD);
    let published_at = item.published_at.as_deref().unwrap_or(MISSING_FIELD);
    let post_type = &item.summary.post_type;

    let mut lines = vec![
        format!(
            "{emoji} <b>{} · {}</b>",
            escape_html(source),
            escape_html(post_type)
        ),
        String::new(),
        format!("标题：{}", escape_html(title)),
        format!("作者：{}", escape_html(author)),
        format!("时间：{}", escape_html(published_at)),
        format!("摘要：{}", escape_html(&item.summary.summary)),
    ];

    if let Some(link) = item.link.as_deref() {
        lines.push(String::new());
        lines.push(format!("<a href=\"{link}\">查看原帖</a>"));
    }

    lines.push(String::new());
    lines.push(format!(
        "#{} #{}",
        escape_html(source),
        escape_html(post_type)
    ));

    lines.join("\n")
}
