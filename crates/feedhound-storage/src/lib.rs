// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed ledger for the feedhound watcher.
//!
//! Holds the post dedup ledger, the enrichment results, and the mutable
//! settings store. Access goes through [`Database`], a cloneable handle over
//! a `tokio-rusqlite` connection; schema changes are embedded refinery
//! migrations applied on open.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod settings;

pub use database::Database;
pub use settings::SettingsStore;
