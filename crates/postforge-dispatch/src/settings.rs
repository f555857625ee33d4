// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatcher tuning.

use std::time::Duration;

use postforge_config::PostforgeConfig;
use postforge_resilience::RetryPolicy;

/// Per-attempt timeout, retry policy and provider hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Upper bound on a single remote call once it has started.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Passed through to the remote function untouched.
    pub provider_hint: String,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            retry: RetryPolicy::default(),
            provider_hint: "openai".to_string(),
        }
    }
}

impl DispatchSettings {
    pub fn from_config(config: &PostforgeConfig) -> Self {
        Self {
            timeout: config.generation.timeout(),
            retry: RetryPolicy::from_config(&config.retry, &config.generation),
            provider_hint: config.remote.provider_hint.clone(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        assert_eq!(
            DispatchSettings::from_config(&PostforgeConfig::default()),
            DispatchSettings::default()
        );
    }

    #[test]
    fn config_overrides_flow_through() {
        let mut config = PostforgeConfig::default();
        config.generation.timeout_secs = 30;
        config.generation.max_retries = 0;
        config.remote.provider_hint = "anthropic".into();
        let settings = DispatchSettings::from_config(&config);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.retry.max_retries, 0);
        assert_eq!(settings.provider_hint, "anthropic");
    }
}
