// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the hosted generation function.

use std::time::Duration;

use async_trait::async_trait;
use postforge_config::model::RemoteConfig;
use postforge_core::{
    AdapterType, ErrorKind, HealthStatus, PluginAdapter, PostforgeError, RemoteGenerator,
    RemoteReply,
};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct CallRequest<'a> {
    prompt: &'a str,
    provider: &'a str,
}

/// Client for a hosted function that answers `{content?, error?, fallback?}`.
#[derive(Debug, Clone)]
pub struct HostedFunctionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HostedFunctionClient {
    /// Build a client from the `[remote]` config section.
    ///
    /// Fails when no endpoint is configured or the API key is not a valid
    /// header value.
    pub fn new(config: &RemoteConfig) -> Result<Self, PostforgeError> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| PostforgeError::Config("remote.endpoint is not set".into()))?
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = config.api_key.as_deref() {
            let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| PostforgeError::Config(format!("invalid API key header value: {e}")))?;
            let apikey = HeaderValue::from_str(key)
                .map_err(|e| PostforgeError::Config(format!("invalid API key header value: {e}")))?;
            headers.insert(AUTHORIZATION, bearer);
            headers.insert("apikey", apikey);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| PostforgeError::Remote {
                kind: ErrorKind::Unknown,
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, prompt: &str, provider_hint: &str) -> Result<RemoteReply, PostforgeError> {
        let body = CallRequest {
            prompt,
            provider: provider_hint,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(status = %status, "generation function responded");

        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<RemoteReply>(&text)
                .ok()
                .and_then(|reply| reply.error)
                .unwrap_or(text);
            let kind = kind_for_status(status, &detail);
            warn!(status = %status, error_kind = %kind, "generation function failed");
            return Err(PostforgeError::remote(
                kind,
                format!("generation function returned {status}: {detail}"),
            ));
        }

        serde_json::from_str::<RemoteReply>(&text).map_err(|e| PostforgeError::Remote {
            kind: ErrorKind::ApiError,
            message: format!("failed to parse generation function response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

/// Taxonomy kind for a non-success HTTP status.
///
/// `detail` is the error text from the body; a 400 mentioning moderation
/// is a content-moderation rejection rather than a plain API error.
pub fn kind_for_status(status: StatusCode, detail: &str) -> ErrorKind {
    match status.as_u16() {
        429 => ErrorKind::RateLimit,
        500 | 502 | 503 | 504 => ErrorKind::ServiceDisruption,
        400 if ErrorKind::classify(detail) == ErrorKind::ContentModeration => {
            ErrorKind::ContentModeration
        }
        _ => ErrorKind::ApiError,
    }
}

fn transport_error(e: reqwest::Error) -> PostforgeError {
    let kind = if e.is_timeout() {
        ErrorKind::GenerationTimeout
    } else {
        ErrorKind::NetworkError
    };
    PostforgeError::Remote {
        kind,
        message: format!("request to generation function failed: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl PluginAdapter for HostedFunctionClient {
    fn name(&self) -> &str {
        "hosted-function"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generator
    }

    async fn health_check(&self) -> Result<HealthStatus, PostforgeError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl RemoteGenerator for HostedFunctionClient {
    async fn call_ai(
        &self,
        prompt: &str,
        provider_hint: &str,
    ) -> Result<RemoteReply, PostforgeError> {
        self.post(prompt, provider_hint).await
    }
}
