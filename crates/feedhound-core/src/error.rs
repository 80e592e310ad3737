// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the feedhound pipeline.

use thiserror::Error;

/// The primary error type used across all feedhound crates.
///
/// Variants map to the pipeline's failure domains: retrieval errors are
/// retryable, enrichment errors drive the per-post retry counter, dispatch
/// errors are left for the next scheduled cycle, and store errors abort the
/// current pipeline stage only.
#[derive(Debug, Error)]
pub enum FeedhoundError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure, migration).
    #[error("storage error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Page or feed retrieval errors (network, HTTP status, bot challenge).
    #[error("retrieval error: {message}")]
    Retrieval {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// AI backend errors (API failure, malformed transport, empty response).
    #[error("enrichment error: {message}")]
    Enrichment {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Channel send errors (transport failure, missing acknowledgement).
    #[error("dispatch error: {message}")]
    Dispatch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
