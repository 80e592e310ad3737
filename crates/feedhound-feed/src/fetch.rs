// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feed document retrieval. Single attempt per run; a failed source is
//! skipped until the next scheduled invocation, so no retry loop here.

use std::time::Duration;

use feedhound_core::{FeedItem, FeedhoundError};
use tracing::debug;

use crate::parse::parse_feed;

const FEED_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP retriever for RSS/Atom documents.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
}

impl FeedFetcher {
    pub fn new() -> Result<Self, FeedhoundError> {
        let client = reqwest::Client::builder()
            .user_agent("feedhound/0.1")
            .timeout(FEED_TIMEOUT)
            .build()
            .map_err(|e| FeedhoundError::Retrieval {
                message: format!("failed to build feed client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }

    /// Fetches and parses one source's feed.
    pub async fn fetch_items(
        &self,
        source: &str,
        feed_url: &str,
    ) -> Result<Vec<FeedItem>, FeedhoundError> {
        let response = self
            .client
            .get(feed_url)
            .send()
            .await
            .map_err(|e| FeedhoundError::Retrieval {
                message: format!("feed fetch failed for {source}: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedhoundError::Retrieval {
                message: format!("feed for {source} returned {status}"),
                source: None,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FeedhoundError::Retrieval {
                message: format!("failed to read feed body for {source}: {e}"),
                source: Some(Box::new(e)),
            })?;

        debug!(source, feed_url, bytes = bytes.len(), "feed fetched");
        parse_feed(source, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title>
<item><title>hello</title><link>https://forum.example/t/1</link></item>
</channel></rss>"#;

    #[tokio::test]
    async fn fetches_and_parses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .mount(&server)
            .await;

        let items = FeedFetcher::new()
            .unwrap()
            .fetch_items("nodeseek", &format!("{}/rss.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "hello");
    }

    #[tokio::test]
    async fn http_error_is_a_retrieval_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss.xml"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = FeedFetcher::new()
            .unwrap()
            .fetch_items("nodeseek", &format!("{}/rss.xml", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedhoundError::Retrieval { .. }));
    }
}
