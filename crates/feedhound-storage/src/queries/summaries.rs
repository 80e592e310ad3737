// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summary persistence and the at-most-once dispatch ledger.

use feedhound_core::{FeedhoundError, Summary};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// An unsent summary joined with its post's presentation fields.
///
/// The join is LEFT: retention prunes posts and summaries independently, so
/// a summary can briefly outlive its post. Post-side fields are `None` then.
#[derive(Debug, Clone)]
pub struct UnsentSummary {
    pub summary: Summary,
    pub source: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub link: Option<String>,
}

fn map_summary_row(row: &rusqlite::Row<'_>) -> Result<Summary, rusqlite::Error> {
    Ok(Summary {
        id: row.get(0)?,
        post_id: row.get(1)?,
        summary: row.get(2)?,
        post_type: row.get(3)?,
        sent_to_channel: row.get::<_, i64>(4)? != 0,
        created_at: row.get(5)?,
    })
}

/// Persist the enrichment result for a post. Returns the new row id.
pub async fn insert(
    db: &Database,
    post_id: i64,
    post_type: String,
    summary: String,
) -> Result<i64, FeedhoundError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO summaries (post_id, post_type, summary) VALUES (?1, ?2, ?3)",
                params![post_id, post_type, summary],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Drain candidates: unsent summaries, oldest-created first, joined with
/// their posts' presentation fields.
pub async fn unsent_batch(db: &Database, limit: usize) -> Result<Vec<UnsentSummary>, FeedhoundError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT s.id, s.post_id, s.summary, s.post_type, s.sent_to_channel, s.created_at,
                        p.source, p.title, p.author, p.published_at, p.link
                 FROM summaries s
                 LEFT JOIN posts p ON p.id = s.post_id
                 WHERE s.sent_to_channel = 0
                 ORDER BY s.created_at ASC, s.id ASC
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![limit as i64], |row| {
                    Ok(UnsentSummary {
                        summary: map_summary_row(row)?,
                        source: row.get(6)?,
                        title: row.get(7)?,
                        author: row.get(8)?,
                        published_at: row.get(9)?,
                        link: row.get(10)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Flip the sent flag after a successful, acknowledged delivery.
pub async fn mark_sent(db: &Database, id: i64) -> Result<(), FeedhoundError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE summaries SET sent_to_channel = 1 WHERE id = ?1",
                params![id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch the summary for a post, if one exists.
pub async fn for_post(db: &Database, post_id: i64) -> Result<Option<Summary>, FeedhoundError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, post_id, summary, post_type, sent_to_channel, created_at
                 FROM summaries WHERE post_id = ?1",
            )?;
            let mut rows = stmt.query_map(params![post_id], map_summary_row)?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Delete summaries whose creation time precedes the ISO-8601 cutoff.
///
/// Keyed on the summary's own age; not cascaded from its post.
pub async fn prune_older_than(db: &Database, cutoff: String) -> Result<usize, FeedhoundError> {
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM summaries WHERE created_at < ?1",
                params![cutoff],
            )?;
            Ok(deleted)
        })
        .await
        .map_err(map_tr_err)
}
