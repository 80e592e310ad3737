// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw key/value settings rows. See [`crate::settings::SettingsStore`] for
//! the cached, typed accessors the pipeline uses.

use feedhound_core::FeedhoundError;
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Read one setting. `None` when the key has never been written.
pub async fn get(db: &Database, key: &str) -> Result<Option<String>, FeedhoundError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM settings WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(other),
                })?;
            Ok(value)
        })
        .await
        .map_err(map_tr_err)
}

/// Upsert one setting.
pub async fn set(db: &Database, key: &str, value: &str) -> Result<(), FeedhoundError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
