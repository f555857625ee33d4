// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The remote text-generation call the dispatcher delegates to.

use async_trait::async_trait;

use crate::error::PostforgeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::RemoteReply;

/// An opaque remote generation function.
///
/// Implementations may fail, may return empty content, and may take
/// arbitrarily long. Callers are responsible for bounding the wait.
#[async_trait]
pub trait RemoteGenerator: PluginAdapter {
    /// Sends a fully built prompt and returns whatever the remote produced.
    ///
    /// `provider_hint` names the upstream model family the remote should use.
    async fn call_ai(&self, prompt: &str, provider_hint: &str)
        -> Result<RemoteReply, PostforgeError>;
}
