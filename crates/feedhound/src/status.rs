// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `feedhound status` command implementation.
//!
//! Reads aggregate counters straight from the ledger; no running watcher
//! process is required.

use feedhound_core::FeedhoundError;
use feedhound_pipeline::Pipeline;
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub total_posts: i64,
    pub pending_posts: i64,
    pub total_summaries: i64,
    pub unsent_summaries: i64,
    pub sources: Vec<String>,
}

pub(crate) async fn run_status(pipeline: &Pipeline, json: bool) -> Result<(), FeedhoundError> {
    let stats = pipeline.stats().await?;
    let response = StatusResponse {
        total_posts: stats.total_posts,
        pending_posts: stats.pending_posts,
        total_summaries: stats.total_summaries,
        unsent_summaries: stats.unsent_summaries,
        sources: pipeline
            .config()
            .sources
            .iter()
            .map(|s| s.name.clone())
            .collect(),
    };

    if json {
        let rendered = serde_json::to_string_pretty(&response)
            .map_err(|e| FeedhoundError::Internal(format!("status serialization failed: {e}")))?;
        println!("{rendered}");
    } else {
        println!("posts:     {} total, {} pending", response.total_posts, response.pending_posts);
        println!(
            "summaries: {} total, {} unsent",
            response.total_summaries, response.unsent_summaries
        );
        println!("sources:   {}", response.sources.join(", "));
    }
    Ok(())
}
