// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generation dispatcher.

use std::sync::Arc;

use postforge_core::traits::notifier::TracingNotifier;
use postforge_core::{
    ErrorKind, GenerationRequest, GenerationResponse, Notification, NotificationLevel, Notifier,
    PlatformTarget, PostforgeError, RemoteGenerator, RemoteReply, TokenUsage,
};
use postforge_fallback::generate_fallback;
use postforge_metrics::{MetricsRegistry, record_fallback, record_generation};
use postforge_prompt::{PromptBuilder, PromptInput};
use postforge_scheduler::RequestScheduler;
use tracing::{debug, info, warn};

use crate::settings::DispatchSettings;

/// Operation name under which every dispatch is timed.
pub const GENERATE_CONTENT: &str = "generate_content";

/// Platform label used for metrics and fallback when no platform was given.
const GENERIC_PLATFORM: &str = "generic";

/// Orchestrates prompt building, the remote call and fallback selection.
#[derive(Clone)]
pub struct GenerationDispatcher {
    generator: Arc<dyn RemoteGenerator>,
    scheduler: RequestScheduler,
    metrics: MetricsRegistry,
    prompts: PromptBuilder,
    notifier: Arc<dyn Notifier>,
    settings: DispatchSettings,
}

impl std::fmt::Debug for GenerationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationDispatcher")
            .field("generator", &self.generator.name())
            .field("scheduler", &self.scheduler)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GenerationDispatcher {
    pub fn new(
        generator: Arc<dyn RemoteGenerator>,
        scheduler: RequestScheduler,
        metrics: MetricsRegistry,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            generator,
            scheduler,
            metrics,
            prompts: PromptBuilder::new(),
            notifier: Arc::new(TracingNotifier),
            settings,
        }
    }

    /// Replace the prompt builder, e.g. with a seeded video-script picker.
    pub fn with_prompt_builder(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// Where fallback warnings are sent. Defaults to the tracing log.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// The exact text that would be sent to the remote function.
    ///
    /// Shaped for the first platform; with no platform the trimmed topic is
    /// sent as-is.
    pub fn build_prompt(&self, request: &GenerationRequest) -> String {
        let topic = request.prompt.trim();
        match request.primary_platform() {
            Some(platform) => self.prompts.build(&PromptInput {
                topic,
                platform,
                tone: request.tone,
                goal: request.goal,
                content_type: request.content_type,
                key_points: &request.key_points,
                options: request.options,
            }),
            None => topic.to_string(),
        }
    }

    /// Generate content for `request`.
    ///
    /// Never fails: an empty prompt yields a rejection with no content, and
    /// any remote failure yields fallback text with the error attached.
    pub async fn generate_content(&self, request: &GenerationRequest) -> GenerationResponse {
        let topic = request.prompt.trim();
        let platform = request.primary_platform().cloned();
        let label = platform
            .as_ref()
            .map(PlatformTarget::label)
            .unwrap_or_else(|| GENERIC_PLATFORM.to_string());

        if topic.is_empty() {
            warn!("rejecting generation request with empty prompt");
            record_generation(&label, "rejected");
            return GenerationResponse::rejected("prompt must not be empty");
        }

        let timer = self.metrics.start_timer(GENERATE_CONTENT);
        let prompt = self.build_prompt(request);
        debug!(
            platform = %label,
            content_type = %request.content_type,
            template = request.template_id.as_deref().unwrap_or("none"),
            "dispatching generation request"
        );

        let outcome = self
            .settings
            .retry
            .run(|attempt| self.attempt(&prompt, request, attempt))
            .await;

        let response = match outcome {
            Ok(reply) => self.success(&prompt, reply, platform, &label),
            Err(err) => self.fallback(topic, request, err, platform, &label),
        };

        let elapsed_ms = timer.stop();
        debug!(elapsed_ms, fallback_used = response.fallback_used, "generation finished");
        response
    }

    /// One remote call, queued on the shared scheduler. Anything without
    /// usable content is an error.
    ///
    /// The timeout covers the whole attempt, time spent waiting in the queue
    /// included. The remote call itself is also bounded so an abandoned
    /// call frees its queue slot.
    async fn attempt(
        &self,
        prompt: &str,
        request: &GenerationRequest,
        attempt: u32,
    ) -> Result<RemoteReply, PostforgeError> {
        let generator = self.generator.clone();
        let prompt = prompt.to_string();
        let hint = self.settings.provider_hint.clone();
        let timeout = self.settings.timeout;
        debug!(attempt, priority = %request.priority, "queueing remote call");

        let queued = self.scheduler.submit(request.priority, move || async move {
            tokio::time::timeout(timeout, generator.call_ai(&prompt, &hint))
                .await
                .map_err(|_| PostforgeError::Timeout { duration: timeout })?
        });
        let reply = tokio::time::timeout(timeout, queued)
            .await
            .map_err(|_| PostforgeError::Timeout { duration: timeout })??;

        if reply.usable_content().is_some() {
            return Ok(reply);
        }
        match reply.error {
            Some(message) => Err(PostforgeError::remote(ErrorKind::classify(&message), message)),
            None => Err(PostforgeError::remote(
                ErrorKind::ApiError,
                "generation function returned empty content",
            )),
        }
    }

    fn success(
        &self,
        prompt: &str,
        reply: RemoteReply,
        platform: Option<PlatformTarget>,
        label: &str,
    ) -> GenerationResponse {
        let content = reply.usable_content().unwrap_or_default().to_string();
        let usage = TokenUsage::estimate(prompt, &content);
        let remote_fallback = reply.fallback.unwrap_or(false);
        if remote_fallback {
            info!(platform = %label, "remote function served its own fallback content");
        }
        record_generation(label, "success");
        info!(
            platform = %label,
            total_tokens = usage.total_tokens,
            "generated content"
        );
        GenerationResponse::success(content, usage, platform, remote_fallback)
    }

    fn fallback(
        &self,
        topic: &str,
        request: &GenerationRequest,
        err: PostforgeError,
        platform: Option<PlatformTarget>,
        label: &str,
    ) -> GenerationResponse {
        let kind = err.kind();
        warn!(platform = %label, error_kind = %kind, error = %err, "using fallback content");

        let target = platform
            .clone()
            .unwrap_or_else(|| PlatformTarget::from(GENERIC_PLATFORM));
        let content = generate_fallback(
            topic,
            &target,
            request.tone,
            request.options.use_emojis,
            request.options.use_hashtags,
        );

        record_fallback(kind);
        record_generation(label, "fallback");
        self.notifier.notify(Notification::new(
            NotificationLevel::Warning,
            "Using fallback content",
            kind.advisory(),
        ));
        GenerationResponse::fallback(content, kind, err.to_string(), platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use postforge_core::{AdapterType, HealthStatus, Platform, PluginAdapter};
    use postforge_resilience::RetryPolicy;
    use postforge_scheduler::SchedulerSettings;

    struct Scripted {
        replies: Mutex<VecDeque<Result<RemoteReply, PostforgeError>>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<RemoteReply, PostforgeError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
            })
        }
    }

    #[async_trait]
    impl PluginAdapter for Scripted {
        fn name(&self) -> &str {
            "scripted"
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
    impl RemoteGenerator for Scripted {
        async fn call_ai(&self, _: &str, _: &str) -> Result<RemoteReply, PostforgeError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(RemoteReply::default()))
        }
    }

    fn dispatcher(generator: Arc<Scripted>, retry: RetryPolicy) -> GenerationDispatcher {
        let scheduler = RequestScheduler::new(SchedulerSettings {
            concurrency: 2,
            batch_delay: Duration::from_millis(1000),
        });
        GenerationDispatcher::new(
            generator,
            scheduler,
            MetricsRegistry::default(),
            DispatchSettings::default().with_retry(retry),
        )
    }

    #[test]
    fn raw_prompt_without_platform() {
        let d = dispatcher(Scripted::new(vec![]), RetryPolicy::none());
        let request = GenerationRequest::new("  write about tea  ");
        assert_eq!(d.build_prompt(&request), "write about tea");
    }

    #[test]
    fn platform_prompt_uses_builder() {
        let d = dispatcher(Scripted::new(vec![]), RetryPolicy::none());
        let request = GenerationRequest::new("tea").with_platform(Platform::Twitter);
        assert!(d.build_prompt(&request).contains("Twitter/X"));
    }

    #[tokio::test(start_paused = true)]
    async fn remote_fallback_flag_is_carried() {
        let reply = RemoteReply {
            content: Some("canned".into()),
            error: None,
            fallback: Some(true),
        };
        let d = dispatcher(Scripted::new(vec![Ok(reply)]), RetryPolicy::none());
        let response = d.generate_content(&GenerationRequest::new("tea")).await;
        assert!(response.is_success());
        assert!(response.fallback_used);
        assert_eq!(response.content, "canned");
    }

    #[tokio::test(start_paused = true)]
    async fn error_text_is_classified() {
        let d = dispatcher(
            Scripted::new(vec![Ok(RemoteReply::error("blocked by content policy"))]),
            RetryPolicy::default(),
        );
        let response = d.generate_content(&GenerationRequest::new("tea")).await;
        assert_eq!(response.error_kind, Some(ErrorKind::ContentModeration));
        assert!(response.fallback_used);
        assert!(!response.content.is_empty());
    }

    #[tokio::test(start_paused = true)]
    #[tracing_test::traced_test]
    async fn fallback_is_logged() {
        let d = dispatcher(Scripted::new(vec![]), RetryPolicy::none());
        let response = d
            .generate_content(&GenerationRequest::new("tea").with_platform("threads"))
            .await;
        assert!(response.fallback_used);
        assert!(logs_contain("using fallback content"));
    }
}
