// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post ingestion and the enrichment state machine.
//!
//! Posts move `pending -> processed` either through successful enrichment,
//! by exhausting the retry cap, or immediately when no content is
//! obtainable. All mutations are single-row keyed updates.

use feedhound_core::{FeedItem, FeedhoundError, Post, PostOutcome};
use rusqlite::params;
use tracing::debug;

use crate::database::{Database, map_tr_err};

/// Result of [`increment_retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// The post stays eligible; carries the post-increment counter.
    Retained { retry_count: i64 },
    /// The cap was reached; the post was force-finalized as a side effect.
    CapReached,
}

fn map_post_row(row: &rusqlite::Row<'_>) -> Result<Post, rusqlite::Error> {
    Ok(Post {
        id: row.get(0)?,
        source: row.get(1)?,
        title: row.get(2)?,
        author: row.get(3)?,
        published_at: row.get(4)?,
        content: row.get(5)?,
        link: row.get(6)?,
        processed: row.get::<_, i64>(7)? != 0,
        retry_count: row.get(8)?,
        created_at: row.get(9)?,
    })
}

const POST_COLUMNS: &str =
    "id, source, title, author, published_at, content, link, processed, retry_count, created_at";

/// Insert a batch of parsed feed items, ignoring link collisions.
///
/// Returns the number of newly inserted rows; duplicates are not errors.
pub async fn insert_batch(db: &Database, items: Vec<FeedItem>) -> Result<usize, FeedhoundError> {
    let inserted = db
        .connection()
        .call(move |conn| {
            let mut inserted = 0usize;
            let mut stmt = conn.prepare(
                "INSERT OR IGNORE INTO posts (source, title, author, published_at, content, link)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for item in &items {
                inserted += stmt.execute(params![
                    item.source,
                    item.title,
                    item.author,
                    item.published_at
                        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                        .to_string(),
                    item.excerpt,
                    item.link,
                ])?;
            }
            Ok(inserted)
        })
        .await
        .map_err(map_tr_err)?;
    debug!(inserted, "post batch inserted");
    Ok(inserted)
}

/// Drain candidates: unprocessed posts below the retry cap, oldest first.
pub async fn pending_batch(
    db: &Database,
    cap: i64,
    limit: usize,
) -> Result<Vec<Post>, FeedhoundError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {POST_COLUMNS} FROM posts
                 WHERE processed = 0 AND retry_count < ?1
                 ORDER BY created_at ASC, id ASC
                 LIMIT ?2"
            ))?;
            let rows = stmt
                .query_map(params![cap, limit as i64], map_post_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Unconditional transition to `processed`.
pub async fn mark_processed(db: &Database, id: i64) -> Result<(), FeedhoundError> {
    db.connection()
        .call(move |conn| {
            conn.execute("UPDATE posts SET processed = 1 WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Atomically increment the retry counter for a post.
///
/// If the post-increment count reaches `cap`, the post is immediately
/// finalized as `processed` so it is never retried again, and the caller
/// is told the cap was hit.
pub async fn increment_retry(
    db: &Database,
    id: i64,
    cap: i64,
) -> Result<RetryOutcome, FeedhoundError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE posts SET retry_count = retry_count + 1 WHERE id = ?1",
                params![id],
            )?;
            let retry_count: i64 = conn.query_row(
                "SELECT retry_count FROM posts WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )?;
            if retry_count >= cap {
                conn.execute("UPDATE posts SET processed = 1 WHERE id = ?1", params![id])?;
                Ok(RetryOutcome::CapReached)
            } else {
                Ok(RetryOutcome::Retained { retry_count })
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Delete posts whose creation time precedes the ISO-8601 cutoff.
///
/// Keyed on row creation time, not publish time.
pub async fn prune_older_than(db: &Database, cutoff: String) -> Result<usize, FeedhoundError> {
    db.connection()
        .call(move |conn| {
            let deleted =
                conn.execute("DELETE FROM posts WHERE created_at < ?1", params![cutoff])?;
            Ok(deleted)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch one post by id.
pub async fn get(db: &Database, id: i64) -> Result<Option<Post>, FeedhoundError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"))?;
            let mut rows = stmt.query_map(params![id], map_post_row)?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Resolve the explicit lifecycle state of a post.
///
/// The persisted representation is a flag + counter; the reason for a
/// terminal state is recovered from those plus summary presence.
pub async fn outcome(
    db: &Database,
    id: i64,
    cap: i64,
) -> Result<Option<PostOutcome>, FeedhoundError> {
    db.connection()
        .call(move |conn| {
            let row = conn
                .query_row(
                    "SELECT p.processed, p.retry_count,
                            EXISTS(SELECT 1 FROM summaries s WHERE s.post_id = p.id)
                     FROM posts p WHERE p.id = ?1",
                    params![id],
                    |row| {
                        Ok((
                            row.get::<_, i64>(0)? != 0,
                            row.get::<_, i64>(1)?,
                            row.get::<_, i64>(2)? != 0,
                        ))
                    },
                )
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(other),
                })?;

            Ok(row.map(|(processed, retry_count, has_summary)| {
                if !processed {
                    PostOutcome::Pending
                } else if has_summary {
                    PostOutcome::Enriched
                } else if retry_count >= cap {
                    PostOutcome::Exhausted
                } else {
                    PostOutcome::NoContent
                }
            }))
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("posts.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn item(link: &str) -> FeedItem {
        FeedItem {
            source: "nodeseek".into(),
            title: "VPS Deal".into(),
            link: link.into(),
            author: Some("alice".into()),
            published_at: chrono::Utc::now(),
            excerpt: "2 vCPU 4GB $5/mo".into(),
        }
    }

    #[tokio::test]
    async fn insert_batch_is_idempotent_on_link() {
        let (db, _dir) = setup_db().await;

        let first = insert_batch(&db, vec![item("https://x/1"), item("https://x/2")])
            .await
            .unwrap();
        assert_eq!(first, 2);

        // Re-ingesting the same links is a no-op, not an error.
        let second = insert_batch(&db, vec![item("https://x/1"), item("https://x/3")])
            .await
            .unwrap();
        assert_eq!(second, 1);

        let total: i64 = db
            .connection()
            .call(|conn| {
                let n = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
                Ok::<_, rusqlite::Error>(n)
            })
            .await
            .unwrap();
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn pending_batch_is_oldest_first_and_respects_cap() {
        let (db, _dir) = setup_db().await;
        insert_batch(&db, vec![item("https://x/1"), item("https://x/2")])
            .await
            .unwrap();

        let batch = pending_batch(&db, 3, 5).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch[0].id < batch[1].id);

        // A post at the cap is excluded.
        let id = batch[0].id;
        for _ in 0..3 {
            increment_retry(&db, id, 3).await.unwrap();
        }
        let batch = pending_batch(&db, 3, 5).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_ne!(batch[0].id, id);
    }

    #[tokio::test]
    async fn retry_cap_finalizes_the_post() {
        let (db, _dir) = setup_db().await;
        insert_batch(&db, vec![item("https://x/1")]).await.unwrap();
        let post = pending_batch(&db, 3, 1).await.unwrap().remove(0);

        assert_eq!(
            increment_retry(&db, post.id, 3).await.unwrap(),
            RetryOutcome::Retained { retry_count: 1 }
        );
        assert_eq!(
            increment_retry(&db, post.id, 3).await.unwrap(),
            RetryOutcome::Retained { retry_count: 2 }
        );
        assert_eq!(
            increment_retry(&db, post.id, 3).await.unwrap(),
            RetryOutcome::CapReached
        );

        let post = get(&db, post.id).await.unwrap().unwrap();
        assert!(post.processed);
        assert_eq!(post.retry_count, 3);

        // Terminal reason is distinguishable as "exhausted", not "no content".
        let state = outcome(&db, post.id, 3).await.unwrap().unwrap();
        assert_eq!(state, PostOutcome::Exhausted);
    }

    #[tokio::test]
    async fn mark_processed_without_summary_reads_as_no_content() {
        let (db, _dir) = setup_db().await;
        insert_batch(&db, vec![item("https://x/1")]).await.unwrap();
        let post = pending_batch(&db, 3, 1).await.unwrap().remove(0);

        assert_eq!(
            outcome(&db, post.id, 3).await.unwrap().unwrap(),
            PostOutcome::Pending
        );

        mark_processed(&db, post.id).await.unwrap();
        assert_eq!(
            outcome(&db, post.id, 3).await.unwrap().unwrap(),
            PostOutcome::NoContent
        );
    }

    #[tokio::test]
    async fn prune_respects_the_retention_boundary() {
        let (db, _dir) = setup_db().await;
        insert_batch(&db, vec![item("https://x/old"), item("https://x/new")])
            .await
            .unwrap();

        // Backdate the first row past the window; leave the second just inside.
        db.connection()
            .call(|conn| {
                conn.execute(
                    "UPDATE posts SET created_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now', '-8 days')
                     WHERE link = 'https://x/old'",
                    [],
                )?;
                conn.execute(
                    "UPDATE posts SET created_at =
                         strftime('%Y-%m-%dT%H:%M:%fZ', 'now', '-6 days', '-23 hours')
                     WHERE link = 'https://x/new'",
                    [],
                )?;
                Ok::<_, rusqlite::Error>(())
            })
            .await
            .unwrap();

        let cutoff = (chrono::Utc::now() - chrono::Duration::days(7))
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string();
        let deleted = prune_older_than(&db, cutoff).await.unwrap();
        assert_eq!(deleted, 1);

        let remaining: i64 = db
            .connection()
            .call(|conn| {
                let n = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
                Ok::<_, rusqlite::Error>(n)
            })
            .await
            .unwrap();
        assert_eq!(remaining, 1);
    }
}
