// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table concern.

pub mod posts;
pub mod settings;
pub mod summaries;

use feedhound_core::{FeedhoundError, Stats};

use crate::database::{Database, map_tr_err};

/// Aggregate counters for the administrative layer.
pub async fn stats(db: &Database) -> Result<Stats, FeedhoundError> {
    db.connection()
        .call(|conn| {
            let stats = conn.query_row(
                "SELECT
                     (SELECT COUNT(*) FROM posts),
                     (SELECT COUNT(*) FROM posts WHERE processed = 0),
                     (SELECT COUNT(*) FROM summaries),
                     (SELECT COUNT(*) FROM summaries WHERE sent_to_channel = 0)",
                [],
                |row| {
                    Ok(Stats {
                        total_posts: row.get(0)?,
                        pending_posts: row.get(1)?,
                        total_summaries: row.get(2)?,
                        unsent_summaries: row.get(3)?,
                    })
                },
            )?;
            Ok(stats)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedhound_core::FeedItem;
    use tempfile::tempdir;

    #[tokio::test]
    async fn stats_counts_all_four_dimensions() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("stats.db").to_str().unwrap())
            .await
            .unwrap();

        let items = vec![
            FeedItem {
                source: "nodeseek".into(),
                title: "a".into(),
                link: "https://x/1".into(),
                author: None,
                published_at: chrono::Utc::now(),
                excerpt: String::new(),
            },
            FeedItem {
                source: "nodeseek".into(),
                title: "b".into(),
                link: "https://x/2".into(),
                author: None,
                published_at: chrono::Utc::now(),
                excerpt: String::new(),
            },
        ];
        posts::insert_batch(&db, items).await.unwrap();
        let post = posts::pending_batch(&db, 3, 1).await.unwrap().remove(0);
        posts::mark_processed(&db, post.id).await.unwrap();
        let sid = summaries::insert(&db, post.id, "促销".into(), "cheap".into())
            .await
            .unwrap();

        let s = stats(&db).await.unwrap();
        assert_eq!(s.total_posts, 2);
        assert_eq!(s.pending_posts, 1);
        assert_eq!(s.total_summaries, 1);
        assert_eq!(s.unsent_summaries, 1);

        summaries::mark_sent(&db, sid).await.unwrap();
        let s = stats(&db).await.unwrap();
        assert_eq!(s.unsent_summaries, 0);
    }
}
