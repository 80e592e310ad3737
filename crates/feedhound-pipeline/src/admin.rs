// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Administrative surface consumed by outer layers: aggregate counters,
//! settings read/write, a channel test message and a one-off test
//! classification. Pipeline runs themselves go through
//! [`super::pipeline::Pipeline::run_once`].

use feedhound_core::{
    AiSettings, ChannelSettings, Enrichment, FeedhoundError, Stats,
};
use feedhound_storage::queries;
use feedhound_telegram::format::escape_html;

use crate::pipeline::Pipeline;

impl Pipeline {
    /// Aggregate counters: total/pending posts, total/unsent summaries.
    pub async fn stats(&self) -> Result<Stats, FeedhoundError> {
        queries::stats(self.database()).await
    }

    /// Effective AI settings (stored values over config defaults).
    pub async fn ai_settings(&self) -> Result<AiSettings, FeedhoundError> {
        self.settings().ai_settings(&self.config().enrich).await
    }

    pub async fn set_ai_settings(&self, settings: &AiSettings) -> Result<(), FeedhoundError> {
        self.settings().set_ai_settings(settings).await
    }

    /// Effective channel settings (stored values over config defaults).
    pub async fn channel_settings(&self) -> Result<ChannelSettings, FeedhoundError> {
        self.settings()
            .channel_settings(&self.config().telegram)
            .await
    }

    pub async fn set_channel_settings(
        &self,
        settings: &ChannelSettings,
    ) -> Result<(), FeedhoundError> {
        self.settings().set_channel_settings(settings).await
    }

    /// Sends a plain test message to verify channel credentials.
    pub async fn send_test_message(&self, text: &str) -> Result<(), FeedhoundError> {
        let channel = self.channel_settings().await?;
        let body = format!("🧪 <b>feedhound test</b>\n\n{}", escape_html(text));
        self.telegram_client().send_message(&channel, &body).await
    }

    /// Runs one classification against the configured AI backend without
    /// touching the store.
    pub async fn classify_test(
        &self,
        title: &str,
        content: &str,
    ) -> Result<Option<Enrichment>, FeedhoundError> {
        let ai = self.ai_settings().await?;
        self.enrich_client().enrich(&ai, title, content).await
    }
}
