// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generator used when no remote endpoint is configured.

use async_trait::async_trait;
use postforge_core::{
    AdapterType, ErrorKind, HealthStatus, PluginAdapter, PostforgeError, RemoteGenerator,
    RemoteReply,
};

/// Always reports the service as unavailable, so every request is served
/// from the local fallback bank.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

#[async_trait]
impl PluginAdapter for OfflineGenerator {
    fn name(&self) -> &str {
        "offline"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generator
    }

    async fn health_check(&self) -> Result<HealthStatus, PostforgeError> {
        Ok(HealthStatus::Degraded(
            "no remote endpoint configured".to_string(),
        ))
    }
}

#[async_trait]
impl RemoteGenerator for OfflineGenerator {
    async fn call_ai(&self, _prompt: &str, _provider_hint: &str) -> Result<RemoteReply, PostforgeError> {
        Err(PostforgeError::remote(
            ErrorKind::ServiceDisruption,
            "no generation endpoint configured (set remote.endpoint)",
        ))
    }
}
