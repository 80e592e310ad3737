// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retry and pacing policy for page fetches.
//!
//! Delays are randomized to avoid a recognizable request cadence. The policy
//! is injected into [`crate::fetch::PageFetcher`] so tests can zero it out.

use std::time::Duration;

use feedhound_config::model::FetchConfig;
use rand::Rng;

/// Attempt count, delay windows and the minimum acceptable body size.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Total fetch attempts before giving up.
    pub attempts: u32,
    /// Uniform delay in milliseconds before every attempt, `[lo, hi)`.
    pub pre_delay_ms: (u64, u64),
    /// Uniform delay in milliseconds between attempts, `[lo, hi]`.
    pub retry_delay_ms: (u64, u64),
    /// Bodies shorter than this are treated as block pages.
    pub min_body_len: usize,
}

impl BackoffPolicy {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            attempts: config.attempts,
            pre_delay_ms: (config.pre_delay_min_ms, config.pre_delay_max_ms),
            retry_delay_ms: (config.retry_delay_min_ms, config.retry_delay_max_ms),
            min_body_len: config.min_body_len,
        }
    }

    /// Policy with no delays, for tests.
    pub fn immediate(attempts: u32, min_body_len: usize) -> Self {
        Self {
            attempts,
            pre_delay_ms: (0, 0),
            retry_delay_ms: (0, 0),
            min_body_len,
        }
    }

    /// Draws the delay applied before an attempt.
    pub fn pre_delay(&self) -> Duration {
        let (lo, hi) = self.pre_delay_ms;
        if lo >= hi {
            return Duration::from_millis(lo);
        }
        Duration::from_millis(rand::thread_rng().gen_range(lo..hi))
    }

    /// Draws the delay applied between attempts.
    pub fn retry_delay(&self) -> Duration {
        let (lo, hi) = self.retry_delay_ms;
        if lo >= hi {
            return Duration::from_millis(lo);
        }
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }
}
