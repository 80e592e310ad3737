// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilient page fetcher.
//!
//! Forum pages sit behind bot-challenge screens, so every request carries a
//! browser-like header set and the fetch loop retries on block pages as well
//! as on transport failures.

use std::time::Duration;

use feedhound_core::FeedhoundError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::backoff::BackoffPolicy;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Substrings that mark a bot-challenge interstitial rather than real content.
const BOT_MARKERS: &[&str] = &[
    "checking your browser",
    "cloudflare",
    "cf-browser-verification",
];

/// HTTP fetcher with retry, pacing and block-page detection.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    policy: BackoffPolicy,
}

impl PageFetcher {
    pub fn new(policy: BackoffPolicy, timeout: Duration) -> Result<Self, FeedhoundError> {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
        headers.insert(
            "accept",
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            "accept-language",
            HeaderValue::from_static("en-US,en;q=0.9,zh-CN;q=0.8"),
        );
        headers.insert("referer", HeaderValue::from_static("https://www.google.com/"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FeedhoundError::Retrieval {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, policy })
    }

    /// Fetches a page body, retrying on failures and block pages.
    ///
    /// Each attempt sleeps a randomized pre-attempt delay first; attempts
    /// after the first additionally wait the inter-retry delay. After the
    /// last attempt the last observed error is returned.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FeedhoundError> {
        let mut last_error = None;

        for attempt in 1..=self.policy.attempts {
            if attempt > 1 {
                tokio::time::sleep(self.policy.retry_delay()).await;
            }
            tokio::time::sleep(self.policy.pre_delay()).await;

            match self.try_fetch(url).await {
                // A block page can slip through with a 200; too-short bodies
                // on an otherwise successful fetch are rejected outright
                // rather than retried or handed to extraction.
                Ok(body) if body.len() < self.policy.min_body_len => {
                    return Err(FeedhoundError::Retrieval {
                        message: format!(
                            "page body too short ({} < {} bytes): {url}",
                            body.len(),
                            self.policy.min_body_len
                        ),
                        source: None,
                    });
                }
                Ok(body) => {
                    debug!(url, attempt, bytes = body.len(), "page fetched");
                    return Ok(body);
                }
                Err(e) => {
                    warn!(url, attempt, error = %e, "page fetch attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FeedhoundError::Retrieval {
            message: format!("page fetch failed after {} attempts: {url}", self.policy.attempts),
            source: None,
        }))
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FeedhoundError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedhoundError::Retrieval {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedhoundError::Retrieval {
                message: format!("page returned {status}: {url}"),
                source: None,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedhoundError::Retrieval {
                message: format!("failed to read page body: {e}"),
                source: Some(Box::new(e)),
            })?;

        let lowered = body.to_lowercase();
        if let Some(marker) = BOT_MARKERS.iter().find(|m| lowered.contains(**m)) {
            return Err(FeedhoundError::Retrieval {
                message: format!("bot challenge page detected ({marker}): {url}"),
                source: None,
            });
        }

        Ok(body)
    }
}
