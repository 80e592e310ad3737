// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types stored in the ledger. The domain shapes live in
//! `feedhound-core`; this module re-exports them alongside the
//! storage-only join types.

pub use feedhound_core::types::{Post, Stats, Summary};

pub use crate::queries::posts::RetryOutcome;
pub use crate::queries::summaries::UnsentSummary;
