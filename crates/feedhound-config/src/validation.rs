// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as known provider names, well-formed URLs, and
//! consistent delay bounds.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::FeedhoundConfig;

/// Provider names the enrichment service understands.
const KNOWN_PROVIDERS: &[&str] = &["openai", "gemini", "ollama"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FeedhoundConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !KNOWN_PROVIDERS.contains(&config.enrich.provider.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "enrich.provider `{}` is not one of: {}",
                config.enrich.provider,
                KNOWN_PROVIDERS.join(", ")
            ),
        });
    }

    if !config.enrich.endpoint.starts_with("http://")
        && !config.enrich.endpoint.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "enrich.endpoint `{}` must be an http(s) URL",
                config.enrich.endpoint
            ),
        });
    }

    if !config.enrich.prompt.contains("{content}") {
        errors.push(ConfigError::Validation {
            message: "enrich.prompt must contain the `{content}` placeholder".to_string(),
        });
    }

    if config.enrich.batch_size == 0 {
        errors.push(ConfigError::Validation {
            message: "enrich.batch_size must be at least 1".to_string(),
        });
    }

    if config.enrich.retry_cap < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "enrich.retry_cap must be at least 1, got {}",
                config.enrich.retry_cap
            ),
        });
    }

    if config.fetch.attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "fetch.attempts must be at least 1".to_string(),
        });
    }

    if config.fetch.pre_delay_min_ms > config.fetch.pre_delay_max_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "fetch.pre_delay_min_ms ({}) must not exceed fetch.pre_delay_max_ms ({})",
                config.fetch.pre_delay_min_ms, config.fetch.pre_delay_max_ms
            ),
        });
    }

    if config.fetch.retry_delay_min_ms > config.fetch.retry_delay_max_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "fetch.retry_delay_min_ms ({}) must not exceed fetch.retry_delay_max_ms ({})",
                config.fetch.retry_delay_min_ms, config.fetch.retry_delay_max_ms
            ),
        });
    }

    if config.telegram.batch_size == 0 {
        errors.push(ConfigError::Validation {
            message: "telegram.batch_size must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.retention.days < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "retention.days must be at least 1, got {}",
                config.retention.days
            ),
        });
    }

    if config.retention.cleanup_interval_hours < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "retention.cleanup_interval_hours must be at least 1, got {}",
                config.retention.cleanup_interval_hours
            ),
        });
    }

    // Sources: non-empty names, valid URLs, no duplicate names.
    let mut seen_names = HashSet::new();
    for (i, source) in config.sources.iter().enumerate() {
        if source.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("sources[{i}].name must not be empty"),
            });
        }
        if !source.feed_url.starts_with("http://") && !source.feed_url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!(
                    "sources[{i}].feed_url `{}` must be an http(s) URL",
                    source.feed_url
                ),
            });
        }
        if !seen_names.insert(&source.name) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate source name `{}` in [[sources]] array", source.name),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceConfig;

    #[test]
    fn default_config_is_valid() {
        let config = FeedhoundConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let mut config = FeedhoundConfig::default();
        config.enrich.provider = "mystery".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("mystery")));
    }

    #[test]
    fn prompt_without_placeholder_is_rejected() {
        let mut config = FeedhoundConfig::default();
        config.enrich.prompt = "summarize this".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("{content}"))
        );
    }

    #[test]
    fn inverted_delay_bounds_are_rejected() {
        let mut config = FeedhoundConfig::default();
        config.fetch.pre_delay_min_ms = 5000;
        config.fetch.pre_delay_max_ms = 1000;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn duplicate_source_names_are_rejected() {
        let mut config = FeedhoundConfig::default();
        config.sources.push(SourceConfig {
            name: "nodeseek".into(),
            feed_url: "https://example.com/rss".into(),
            emoji: "📌".into(),
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("duplicate")));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = FeedhoundConfig::default();
        config.enrich.provider = "bogus".into();
        config.enrich.batch_size = 0;
        config.retention.days = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
