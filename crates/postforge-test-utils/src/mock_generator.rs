// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock remote generator for deterministic testing.
//!
//! `MockGenerator` implements `RemoteGenerator` with a FIFO script of
//! outcomes. When the script runs out, the fallback outcome is used
//! (plain "mock content" unless configured otherwise).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use postforge_core::{
    AdapterType, ErrorKind, HealthStatus, PluginAdapter, PostforgeError, RemoteGenerator,
    RemoteReply,
};
use tokio::sync::Mutex;

/// One scripted outcome of `call_ai`.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this reply as-is.
    Reply(RemoteReply),
    /// Fail with a remote error of this kind.
    Fail(ErrorKind, String),
    /// Wait, then return the reply.
    Delayed(Duration, RemoteReply),
    /// Never resolve.
    Hang,
}

impl MockReply {
    pub fn content(text: impl Into<String>) -> Self {
        Self::Reply(RemoteReply::content(text))
    }

    /// A reply with neither content nor error.
    pub fn empty() -> Self {
        Self::Reply(RemoteReply {
            content: Some(String::new()),
            error: None,
            fallback: None,
        })
    }

    pub fn fail(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Fail(kind, message.into())
    }
}

/// A scripted remote generator that records every prompt it is sent.
#[derive(Debug)]
pub struct MockGenerator {
    script: Mutex<VecDeque<MockReply>>,
    exhausted: MockReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerator {
    /// Empty script; every call returns "mock content".
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    /// Pre-loaded script, consumed front to back.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(replies)),
            exhausted: MockReply::content("mock content"),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call hangs forever.
    pub fn never_resolves() -> Self {
        Self::new().when_exhausted(MockReply::Hang)
    }

    /// Outcome used once the script is empty.
    pub fn when_exhausted(mut self, reply: MockReply) -> Self {
        self.exhausted = reply;
        self
    }

    /// Append an outcome to the script.
    pub async fn push(&self, reply: MockReply) {
        self.script.lock().await.push_back(reply);
    }

    /// Number of `call_ai` invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    async fn next_reply(&self) -> MockReply {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.exhausted.clone())
    }
}

#[async_trait]
impl PluginAdapter for MockGenerator {
    fn name(&self) -> &str {
        "mock-generator"
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
impl RemoteGenerator for MockGenerator {
    async fn call_ai(
        &self,
        prompt: &str,
        _provider_hint: &str,
    ) -> Result<RemoteReply, PostforgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(prompt.to_string());

        match self.next_reply().await {
            MockReply::Reply(reply) => Ok(reply),
            MockReply::Fail(kind, message) => Err(PostforgeError::remote(kind, message)),
            MockReply::Delayed(delay, reply) => {
                tokio::time::sleep(delay).await;
                Ok(reply)
            }
            MockReply::Hang => std::future::pending().await,
        }
    }
}
