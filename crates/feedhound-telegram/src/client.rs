// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot API client.
//!
//! A send is only successful when the transport succeeded AND the API body
//! acknowledged with `ok: true`; anything else is a dispatch error.

use std::time::Duration;

use feedhound_core::{ChannelSettings, FeedhoundError};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const API_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new() -> Result<Self, FeedhoundError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FeedhoundError::Dispatch {
                message: format!("failed to build Telegram client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends one HTML-formatted message to the configured chat.
    pub async fn send_message(
        &self,
        channel: &ChannelSettings,
        text: &str,
    ) -> Result<(), FeedhoundError> {
        if channel.bot_token.is_empty() || channel.chat_id.is_empty() {
            return Err(FeedhoundError::Dispatch {
                message: "telegram bot_token and chat_id are not configured".into(),
                source: None,
            });
        }

        let url = format!("{}/bot{}/sendMessage", self.base_url, channel.bot_token);
        let body = json!({
            "chat_id": channel.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| FeedhoundError::Dispatch {
                message: format!("Telegram request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let raw = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(FeedhoundError::Dispatch {
                message: format!("Telegram API returned {status}: {raw}"),
                source: None,
            });
        }

        let parsed: ApiResponse =
            serde_json::from_str(&raw).map_err(|e| FeedhoundError::Dispatch {
                message: format!("failed to parse Telegram response: {e}"),
                source: Some(Box::new(e)),
            })?;
        if !parsed.ok {
            return Err(FeedhoundError::Dispatch {
                message: format!(
                    "Telegram API rejected the message: {}",
                    parsed.description.unwrap_or_else(|| "no description".into())
                ),
                source: None,
            });
        }

        debug!(chat_id = %channel.chat_id, "message delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn channel() -> ChannelSettings {
        ChannelSettings {
            bot_token: "123:abc".into(),
            chat_id: "@mychannel".into(),
        }
    }

    #[tokio::test]
    async fn sends_to_token_scoped_path_with_html_mode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": "@mychannel",
                "parse_mode": "HTML",
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        TelegramClient::new()
            .unwrap()
            .with_base_url(server.uri())
            .send_message(&channel(), "<b>hi</b>")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn http_success_with_ok_false_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"ok": false, "description": "chat not found"}),
            ))
            .mount(&server)
            .await;

        let err = TelegramClient::new()
            .unwrap()
            .with_base_url(server.uri())
            .send_message(&channel(), "hi")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("chat not found"), "got: {err}");
    }

    #[tokio::test]
    async fn http_error_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = TelegramClient::new()
            .unwrap()
            .with_base_url(server.uri())
            .send_message(&channel(), "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, FeedhoundError::Dispatch { .. }));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        let empty = ChannelSettings {
            bot_token: String::new(),
            chat_id: String::new(),
        };
        let err = TelegramClient::new()
            .unwrap()
            .send_message(&empty, "hi")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not configured"), "got: {err}");
    }
}
