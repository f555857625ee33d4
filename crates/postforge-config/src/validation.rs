// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::PostforgeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &PostforgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.app.log_level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "app.log_level `{}` must be one of {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.app.library_path.trim().is_empty() {
        errors.push(ConfigError::validation("app.library_path must not be empty"));
    }

    if let Some(endpoint) = &config.remote.endpoint {
        let endpoint = endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            errors.push(ConfigError::validation(format!(
                "remote.endpoint `{endpoint}` must be an http(s) URL"
            )));
        }
    }

    if config.remote.request_timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "remote.request_timeout_secs must be greater than 0",
        ));
    }

    let generation = &config.generation;
    if generation.timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "generation.timeout_secs must be greater than 0",
        ));
    }
    if !(0.0..=2.0).contains(&generation.temperature) {
        errors.push(ConfigError::validation(format!(
            "generation.temperature must be between 0.0 and 2.0, got {}",
            generation.temperature
        )));
    }
    if generation.max_tokens == 0 {
        errors.push(ConfigError::validation(
            "generation.max_tokens must be greater than 0",
        ));
    }

    if config.retry.base_delay_ms > config.retry.max_delay_ms {
        errors.push(ConfigError::validation(format!(
            "retry.base_delay_ms ({}) must not exceed retry.max_delay_ms ({})",
            config.retry.base_delay_ms, config.retry.max_delay_ms
        )));
    }

    if config.queue.concurrency == 0 {
        errors.push(ConfigError::validation("queue.concurrency must be at least 1"));
    }

    if config.metrics.max_samples == 0 {
        errors.push(ConfigError::validation("metrics.max_samples must be at least 1"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &PostforgeConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&PostforgeConfig::default()).is_ok());
    }

    #[test]
    fn zero_concurrency_fails() {
        let mut config = PostforgeConfig::default();
        config.queue.concurrency = 0;
        assert!(messages(&config).iter().any(|m| m.contains("queue.concurrency")));
    }

    #[test]
    fn bad_endpoint_scheme_fails() {
        let mut config = PostforgeConfig::default();
        config.remote.endpoint = Some("ftp://example.com/generate".into());
        assert!(messages(&config).iter().any(|m| m.contains("remote.endpoint")));
    }

    #[test]
    fn all_problems_are_reported_together() {
        let mut config = PostforgeConfig::default();
        config.generation.timeout_secs = 0;
        config.generation.temperature = 3.5;
        config.retry.base_delay_ms = 20_000;
        config.metrics.max_samples = 0;
        config.app.log_level = "loud".into();
        assert_eq!(messages(&config).len(), 5);
    }

    #[test]
    fn https_endpoint_passes() {
        let mut config = PostforgeConfig::default();
        config.remote.endpoint = Some("https://project.functions.example/generate".into());
        assert!(validate_config(&config).is_ok());
    }
}
