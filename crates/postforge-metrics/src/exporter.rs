// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional Prometheus recorder.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use postforge_core::PostforgeError;

use crate::recording;

/// Installed Prometheus recorder plus a handle for rendering.
///
/// Only one recorder can be installed per process.
pub struct PrometheusExporter {
    handle: PrometheusHandle,
}

impl PrometheusExporter {
    /// Install the recorder globally and register metric descriptions.
    pub fn install() -> Result<Self, PostforgeError> {
        let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
            PostforgeError::Internal(format!("failed to install Prometheus recorder: {e}"))
        })?;
        recording::register_metrics();
        tracing::info!("prometheus metrics recorder installed");
        Ok(Self { handle })
    }

    /// Current metrics in Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl std::fmt::Debug for PrometheusExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusExporter").finish_non_exhaustive()
    }
}
