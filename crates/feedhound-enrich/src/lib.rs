// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI enrichment for the feedhound watcher: send post text to the configured
//! backend and parse the reply into a classification and summary.

pub mod classify;
pub mod client;
pub mod provider;

pub use classify::parse_enrichment;
pub use client::{EnrichClient, build_prompt};
pub use provider::ProviderKind;
