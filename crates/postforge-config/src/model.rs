// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every struct uses `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently ignored.

use std::time::Duration;

use postforge_core::{Goal, Tone};
use serde::{Deserialize, Serialize};

/// Top-level Postforge configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PostforgeConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Hosted generation function.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Generation defaults and limits.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Backoff between retry attempts.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Local request queue.
    #[serde(default)]
    pub queue: QueueConfig,

    /// In-memory performance metrics.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// JSON file backing the content library.
    #[serde(default = "default_library_path")]
    pub library_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            library_path: default_library_path(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_library_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("postforge").join("library.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("library.json"))
        .to_string_lossy()
        .into_owned()
}

/// Hosted generation function settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Function URL. `None` runs the CLI offline (fallback content only).
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer key sent with every call.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upstream model family the function should use.
    #[serde(default = "default_provider_hint")]
    pub provider_hint: String,

    /// Transport-level timeout, independent of the generation timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            provider_hint: default_provider_hint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_provider_hint() -> String {
    "openai".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Generation defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// How long a single remote attempt may take before fallback content is used.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts for retryable failures (rate limits, network, outages).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub default_tone: Tone,

    #[serde(default)]
    pub default_goal: Goal,

    #[serde(default = "default_true")]
    pub use_emojis: bool,

    #[serde(default = "default_true")]
    pub use_hashtags: bool,
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            default_tone: Tone::default(),
            default_goal: Goal::default(),
            use_emojis: true,
            use_hashtags: true,
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    2
}

fn default_temperature() -> f32 {
    postforge_core::types::DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    postforge_core::types::DEFAULT_MAX_TOKENS
}

fn default_true() -> bool {
    true
}

/// Exponential backoff bounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    10_000
}

/// Local request queue settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Maximum tasks running at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Pause between batches when more work is waiting.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

fn default_concurrency() -> usize {
    2
}

fn default_batch_delay_ms() -> u64 {
    1000
}

/// Performance metrics settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Samples kept per operation name; oldest are evicted first.
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,

    /// Install the Prometheus recorder so runs can print exposition text.
    #[serde(default)]
    pub prometheus: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            max_samples: default_max_samples(),
            prometheus: false,
        }
    }
}

fn default_max_samples() -> usize {
    100
}
