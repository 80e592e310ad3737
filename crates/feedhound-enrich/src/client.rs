// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the configured AI backend.
//!
//! One request per post. Transport and API errors surface as
//! [`FeedhoundError::Enrichment`] so the caller can count a retry; an empty
//! model reply is `Ok(None)`, which the caller treats the same way.

use std::time::Duration;

use feedhound_core::{AiSettings, Enrichment, FeedhoundError};
use serde_json::Value;
use tracing::debug;

use crate::classify::parse_enrichment;
use crate::provider::ProviderKind;

/// Token in the prompt template replaced with the post content.
pub const PROMPT_PLACEHOLDER: &str = "{content}";

/// Excerpt text is capped before it enters the prompt.
const EXCERPT_CAP: usize = 1000;

#[derive(Debug, Clone)]
pub struct EnrichClient {
    client: reqwest::Client,
}

impl EnrichClient {
    pub fn new() -> Result<Self, FeedhoundError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| FeedhoundError::Enrichment {
                message: format!("failed to build AI client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }

    /// Classifies and summarizes one post.
    ///
    /// Returns `Ok(None)` when the backend answered successfully but
    /// produced no usable text.
    pub async fn enrich(
        &self,
        settings: &AiSettings,
        title: &str,
        content: &str,
    ) -> Result<Option<Enrichment>, FeedhoundError> {
        let kind = ProviderKind::from_name(&settings.provider).ok_or_else(|| {
            FeedhoundError::Enrichment {
                message: format!("unknown AI provider: {}", settings.provider),
                source: None,
            }
        })?;

        let prompt = build_prompt(&settings.prompt, title, content);
        let (url, body) = kind.request(settings, &prompt);

        let mut request = self.client.post(&url).json(&body);
        if kind.uses_bearer_auth() {
            request = request.bearer_auth(&settings.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FeedhoundError::Enrichment {
                message: format!("AI request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedhoundError::Enrichment {
                message: format!("AI backend returned {status}: {body}"),
                source: None,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| FeedhoundError::Enrichment {
                message: format!("failed to parse AI response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let Some(text) = kind.extract_text(&value) else {
            debug!(provider = %settings.provider, "AI backend returned no text");
            return Ok(None);
        };

        Ok(Some(parse_enrichment(&text)))
    }
}

/// Assembles the prompt: title plus capped excerpt substituted at the
/// placeholder. A template without the placeholder gets the content
/// appended instead of silently dropping it.
pub fn build_prompt(template: &str, title: &str, content: &str) -> String {
    let capped: String = content.chars().take(EXCERPT_CAP).collect();
    let combined = if capped.is_empty() {
        title.to_string()
    } else {
        format!("{title}\n\n{capped}")
    };

    if template.contains(PROMPT_PLACEHOLDER) {
        template.replace(PROMPT_PLACEHOLDER, &combined)
    } else {
        format!("{template}\n\n{combined}")
    }
}
