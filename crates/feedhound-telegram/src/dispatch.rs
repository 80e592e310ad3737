// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draining unsent summaries into the channel.
//!
//! At-most-once per acknowledgement: the sent flag flips only after the API
//! confirms delivery. A failed send is logged and left unsent; unlike
//! enrichment there is no retry cap, so the item stays eligible on every
//! later drain.

use std::collections::HashMap;
use std::time::Duration;

use feedhound_core::{ChannelSettings, FeedhoundError};
use feedhound_storage::Database;
use feedhound_storage::queries::summaries;
use tracing::{info, warn};

use crate::client::TelegramClient;
use crate::format::format_message;

/// Emoji for sources that disappeared from configuration.
const DEFAULT_EMOJI: &str = "📌";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub sent: usize,
}

pub struct Dispatcher {
    client: TelegramClient,
    batch_size: usize,
    message_delay: Duration,
}

impl Dispatcher {
    pub fn new(client: TelegramClient, batch_size: usize, message_delay_ms: u64) -> Self {
        Self {
            client,
            batch_size,
            message_delay: Duration::from_millis(message_delay_ms),
        }
    }

    /// Sends one batch of unsent summaries, oldest first.
    pub async fn drain(
        &self,
        db: &Database,
        channel: &ChannelSettings,
        emojis: &HashMap<String, String>,
    ) -> Result<DispatchReport, FeedhoundError> {
        let batch = summaries::unsent_batch(db, self.batch_size).await?;
        let mut report = DispatchReport::default();

        for item in batch {
            report.attempted += 1;
            let emoji = item
                .source
                .as_deref()
                .and_then(|s| emojis.get(s))
                .map(String::as_str)
                .unwrap_or(DEFAULT_EMOJI);
            let text = format_message(&item, emoji);

            match self.client.send_message(channel, &text).await {
                Ok(()) => {
                    summaries::mark_sent(db, item.summary.id).await?;
                    report.sent += 1;
                }
                Err(e) => {
                    // Left unsent; picked up again on the next drain.
                    warn!(summary_id = item.summary.id, error = %e, "dispatch failed");
                }
            }

            tokio::time::sleep(self.message_delay).await;
        }

        if report.attempted > 0 {
            info!(attempted = report.attempted, sent = report.sent, "dispatch drain complete");
        }
        Ok(report)
    }
}
