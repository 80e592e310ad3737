// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel dispatch for the feedhound watcher: format enriched posts as
//! Telegram HTML messages and deliver them exactly once per acknowledgement.

pub mod client;
pub mod dispatch;
pub mod format;

pub use client::TelegramClient;
pub use dispatch::{DispatchReport, Dispatcher};
pub use format::format_message;
