// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the feedhound forum watcher.
//!
//! Defines the shared error enum and the domain types that flow through the
//! ingestion, enrichment and dispatch stages. All other feedhound crates
//! depend on this one.

pub mod error;
pub mod types;

pub use error::FeedhoundError;
pub use types::{
    AiSettings, ChannelSettings, Enrichment, FeedItem, Post, PostOutcome, PostType, Stats, Summary,
};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn feedhound_error_has_all_variants() {
        // Verify all 6 error variants exist and can be constructed.
        let _config = FeedhoundError::Config("test".into());
        let _store = FeedhoundError::Store {
            source: Box::new(std::io::Error::other("test")),
        };
        let _retrieval = FeedhoundError::Retrieval {
            message: "test".into(),
            source: None,
        };
        let _enrichment = FeedhoundError::Enrichment {
            message: "test".into(),
            source: None,
        };
        let _dispatch = FeedhoundError::Dispatch {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _internal = FeedhoundError::Internal("test".into());
    }

    #[test]
    fn error_messages_name_their_domain() {
        let err = FeedhoundError::Retrieval {
            message: "blocked".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "retrieval error: blocked");

        let err = FeedhoundError::Enrichment {
            message: "empty response".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "enrichment error: empty response");
    }

    #[test]
    fn post_type_displays_localized_label() {
        assert_eq!(PostType::Promotional.to_string(), "促销");
        assert_eq!(PostType::Other.to_string(), "其他");
    }

    #[test]
    fn post_type_parses_both_label_sets() {
        assert_eq!(PostType::from_str("促销").unwrap(), PostType::Promotional);
        assert_eq!(
            PostType::from_str("promotional").unwrap(),
            PostType::Promotional
        );
        assert_eq!(PostType::from_str("其他").unwrap(), PostType::Other);
        assert_eq!(PostType::from_str("Other").unwrap(), PostType::Other);
        assert!(PostType::from_str("spam").is_err());
    }

    #[test]
    fn post_serializes_round_trip() {
        let post = Post {
            id: 1,
            source: "nodeseek".into(),
            title: "VPS Deal".into(),
            author: Some("alice".into()),
            published_at: "2026-08-01T00:00:00.000Z".into(),
            content: "2 vCPU 4GB $5/mo".into(),
            link: "https://x/1".into(),
            processed: false,
            retry_count: 0,
            created_at: "2026-08-01T00:00:01.000Z".into(),
        };
        let json = serde_json::to_string(&post).unwrap();
        let parsed: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.link, post.link);
        assert_eq!(parsed.retry_count, 0);
        assert!(!parsed.processed);
    }

    #[test]
    fn post_outcome_variants_are_distinguishable() {
        assert_ne!(PostOutcome::Exhausted, PostOutcome::NoContent);
        assert_ne!(PostOutcome::Pending, PostOutcome::Enriched);
    }
}
