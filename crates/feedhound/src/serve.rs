// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `feedhound serve` command implementation.
//!
//! Runs the pipeline on the configured interval until interrupted. Overlap
//! between invocations cannot happen here: runs are strictly sequential on
//! one task.

use feedhound_pipeline::Pipeline;
use tracing::info;

pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("feedhound={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Runs scheduled pipeline invocations until ctrl-c.
pub(crate) async fn run_serve(pipeline: &Pipeline) {
    let interval = pipeline.config().watcher.run_interval_secs;
    info!(interval_secs = interval, "feedhound watcher started");

    tokio::select! {
        _ = pipeline.run_forever() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }
}
