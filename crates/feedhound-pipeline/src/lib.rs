// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestration for the feedhound watcher.
//!
//! Wires feed ingestion, page scraping, AI enrichment and channel dispatch
//! around the SQLite ledger, and exposes the admin operations the outer
//! layers call.

pub mod admin;
pub mod pipeline;

pub use pipeline::{Pipeline, RunReport};
