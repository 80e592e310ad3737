// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The scheduled invocation: harvest, enrich, dispatch, retention sweep.
//!
//! Everything runs strictly sequentially with sleep-based pacing between
//! network calls. Per-source and per-post failures are isolated and logged;
//! a store failure aborts its own stage but the remaining stages still run.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use feedhound_config::model::FeedhoundConfig;
use feedhound_core::{FeedItem, FeedhoundError};
use feedhound_enrich::EnrichClient;
use feedhound_feed::FeedFetcher;
use feedhound_scrape::{BackoffPolicy, PageFetcher, extract_content};
use feedhound_storage::queries::{posts, summaries};
use feedhound_storage::{Database, SettingsStore};
use feedhound_telegram::{DispatchReport, Dispatcher, TelegramClient};
use tracing::{debug, error, info, warn};

/// Excerpts at least this long skip the page fetch.
const EXCERPT_FLOOR: usize = 50;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Counters from one full invocation.
#[derive(Debug, Default)]
pub struct RunReport {
    pub inserted: usize,
    pub enriched: usize,
    pub retried: usize,
    pub exhausted: usize,
    pub no_content: usize,
    pub dispatch: DispatchReport,
    pub pruned_posts: usize,
    pub pruned_summaries: usize,
    pub cleanup_ran: bool,
}

pub struct Pipeline {
    config: FeedhoundConfig,
    db: Database,
    settings: SettingsStore,
    feed: FeedFetcher,
    pages: PageFetcher,
    enrich: EnrichClient,
    telegram: TelegramClient,
}

impl Pipeline {
    pub fn new(config: FeedhoundConfig, db: Database) -> Result<Self, FeedhoundError> {
        let settings = SettingsStore::new(db.clone());
        let pages = PageFetcher::new(
            BackoffPolicy::from_config(&config.fetch),
            Duration::from_secs(config.fetch.timeout_secs),
        )?;
        Ok(Self {
            settings,
            feed: FeedFetcher::new()?,
            pages,
            enrich: EnrichClient::new()?,
            telegram: TelegramClient::new()?,
            config,
            db,
        })
    }

    /// Swaps the Telegram client, for tests pointing at a mock server.
    pub fn with_telegram_client(mut self, client: TelegramClient) -> Self {
        self.telegram = client;
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn config(&self) -> &FeedhoundConfig {
        &self.config
    }

    pub(crate) fn telegram_client(&self) -> &TelegramClient {
        &self.telegram
    }

    pub(crate) fn enrich_client(&self) -> &EnrichClient {
        &self.enrich
    }

    /// One full scheduled invocation, stages in strict order. Stage
    /// failures are logged; later stages still run.
    pub async fn run_once(&self) -> RunReport {
        let mut report = RunReport::default();

        match self.harvest().await {
            Ok(inserted) => report.inserted = inserted,
            Err(e) => error!(error = %e, "harvest stage failed"),
        }

        if let Err(e) = self.enrich_pending(&mut report).await {
            error!(error = %e, "enrichment stage failed");
        }

        match self.dispatch_unsent().await {
            Ok(dispatch) => report.dispatch = dispatch,
            Err(e) => error!(error = %e, "dispatch stage failed"),
        }

        if let Err(e) = self.maybe_cleanup(&mut report).await {
            error!(error = %e, "retention stage failed");
        }

        info!(
            inserted = report.inserted,
            enriched = report.enriched,
            sent = report.dispatch.sent,
            cleanup = report.cleanup_ran,
            "pipeline run complete"
        );
        report
    }

    /// Runs the pipeline on the configured interval until the task is
    /// cancelled.
    pub async fn run_forever(&self) {
        let interval = Duration::from_secs(self.config.watcher.run_interval_secs);
        loop {
            self.run_once().await;
            tokio::time::sleep(interval).await;
        }
    }

    /// Stage 1: fetch every source, window-filter, batch insert.
    async fn harvest(&self) -> Result<usize, FeedhoundError> {
        let mut items: Vec<FeedItem> = Vec::new();
        for source in &self.config.sources {
            match self.feed.fetch_items(&source.name, &source.feed_url).await {
                Ok(mut fetched) => items.append(&mut fetched),
                // One bad source never aborts the others.
                Err(e) => warn!(source = %source.name, error = %e, "source harvest failed"),
            }
        }

        // Items older than the retention window would be inserted and
        // immediately pruned; unparseable dates already defaulted to now
        // and pass the filter.
        let cutoff = Utc::now() - chrono::Duration::days(self.config.retention.days);
        items.retain(|item| item.published_at >= cutoff);

        let inserted = posts::insert_batch(&self.db, items).await?;
        if inserted > 0 {
            info!(inserted, "new posts ingested");
        }
        Ok(inserted)
    }

    /// Stage 2: drain pending posts through the AI backend.
    async fn enrich_pending(&self, report: &mut RunReport) -> Result<(), FeedhoundError> {
        let cap = self.config.enrich.retry_cap;
        let batch = posts::pending_batch(&self.db, cap, self.config.enrich.batch_size).await?;
        if batch.is_empty() {
            return Ok(());
        }

        let ai = self.settings.ai_settings(&self.config.enrich).await?;
        let delay = Duration::from_millis(self.config.enrich.post_delay_ms);

        for post in batch {
            let content = match self.obtain_content(&post).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(post_id = post.id, error = %e, "content retrieval failed");
                    self.count_retry(post.id, cap, report).await?;
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };

            if content.trim().is_empty() {
                // Terminal state, not an error: nothing to enrich.
                info!(post_id = post.id, "no content obtainable, finalizing post");
                posts::mark_processed(&self.db, post.id).await?;
                report.no_content += 1;
                tokio::time::sleep(delay).await;
                continue;
            }

            match self.enrich.enrich(&ai, &post.title, &content).await {
                Ok(Some(enrichment)) => {
                    summaries::insert(
                        &self.db,
                        post.id,
                        enrichment.post_type.to_string(),
                        enrichment.summary,
                    )
                    .await?;
                    posts::mark_processed(&self.db, post.id).await?;
                    report.enriched += 1;
                }
                Ok(None) => {
                    warn!(post_id = post.id, "AI backend produced no text");
                    self.count_retry(post.id, cap, report).await?;
                }
                Err(e) => {
                    warn!(post_id = post.id, error = %e, "enrichment failed");
                    self.count_retry(post.id, cap, report).await?;
                }
            }

            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    /// Post body for the prompt: the stored excerpt when long enough,
    /// otherwise the fetched page. Empty extraction falls back to whatever
    /// excerpt exists.
    async fn obtain_content(
        &self,
        post: &feedhound_core::Post,
    ) -> Result<String, FeedhoundError> {
        if post.content.chars().count() >= EXCERPT_FLOOR {
            return Ok(post.content.clone());
        }

        let html = self.pages.fetch_page(&post.link).await?;
        let extracted = extract_content(&html);
        if extracted.is_empty() {
            Ok(post.content.clone())
        } else {
            Ok(extracted)
        }
    }

    async fn count_retry(
        &self,
        post_id: i64,
        cap: i64,
        report: &mut RunReport,
    ) -> Result<(), FeedhoundError> {
        match posts::increment_retry(&self.db, post_id, cap).await? {
            posts::RetryOutcome::Retained { retry_count } => {
                report.retried += 1;
                info!(post_id, retry_count, "post retained for retry");
            }
            posts::RetryOutcome::CapReached => {
                report.exhausted += 1;
                // Distinguishable terminal state: gave up, no summary.
                warn!(post_id, cap, "retry cap reached, post finalized without summary");
            }
        }
        Ok(())
    }

    /// Stage 3: channel drain.
    async fn dispatch_unsent(&self) -> Result<DispatchReport, FeedhoundError> {
        let channel = self.settings.channel_settings(&self.config.telegram).await?;
        let emojis: HashMap<String, String> = self
            .config
            .sources
            .iter()
            .map(|s| (s.name.clone(), s.emoji.clone()))
            .collect();

        let dispatcher = Dispatcher::new(
            self.telegram.clone(),
            self.config.telegram.batch_size,
            self.config.telegram.message_delay_ms,
        );
        dispatcher.drain(&self.db, &channel, &emojis).await
    }

    /// Stage 4: retention sweep, at most once per configured interval.
    async fn maybe_cleanup(&self, report: &mut RunReport) -> Result<(), FeedhoundError> {
        let interval = chrono::Duration::hours(self.config.retention.cleanup_interval_hours);
        if let Some(last) = self.settings.last_cleanup_at().await? {
            if Utc::now() - last < interval {
                debug!(last_cleanup = %last, "retention sweep skipped, inside interval");
                return Ok(());
            }
        }

        let cutoff = (Utc::now() - chrono::Duration::days(self.config.retention.days))
            .format(TIMESTAMP_FORMAT)
            .to_string();

        // Each table is pruned by its own age; a summary can outlive its
        // post and vice versa.
        report.pruned_posts = posts::prune_older_than(&self.db, cutoff.clone()).await?;
        report.pruned_summaries = summaries::prune_older_than(&self.db, cutoff).await?;
        report.cleanup_ran = true;
        self.settings.record_cleanup_now().await?;

        info!(
            pruned_posts = report.pruned_posts,
            pruned_summaries = report.pruned_summaries,
            "retention sweep complete"
        );
        Ok(())
    }
}
