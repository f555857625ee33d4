// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatcher harness for end-to-end tests.
//!
//! `DispatchHarness` wires a real [`GenerationDispatcher`] (real scheduler,
//! real metrics, real fallback bank) to a [`MockGenerator`] and a
//! [`RecordingNotifier`].

use std::sync::Arc;
use std::time::Duration;

use postforge_core::{GenerationRequest, GenerationResponse};
use postforge_dispatch::{DispatchSettings, GenerationDispatcher};
use postforge_metrics::MetricsRegistry;
use postforge_prompt::{FixedPicker, PromptBuilder};
use postforge_resilience::RetryPolicy;
use postforge_scheduler::{RequestScheduler, SchedulerSettings};

use crate::mock_generator::{MockGenerator, MockReply};
use crate::recording_notifier::RecordingNotifier;

/// Builder for [`DispatchHarness`].
pub struct DispatchHarnessBuilder {
    generator: MockGenerator,
    settings: DispatchSettings,
    scheduler: SchedulerSettings,
    max_samples: usize,
}

impl DispatchHarnessBuilder {
    fn new() -> Self {
        Self {
            generator: MockGenerator::new(),
            settings: DispatchSettings::default(),
            scheduler: SchedulerSettings::default(),
            max_samples: 100,
        }
    }

    /// Script the mock generator.
    pub fn with_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.generator = MockGenerator::with_replies(replies);
        self
    }

    /// Use a fully configured generator.
    pub fn with_generator(mut self, generator: MockGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.settings.retry = retry;
        self
    }

    pub fn with_scheduler(mut self, settings: SchedulerSettings) -> Self {
        self.scheduler = settings;
        self
    }

    pub fn build(self) -> DispatchHarness {
        let generator = Arc::new(self.generator);
        let notifier = Arc::new(RecordingNotifier::new());
        let metrics = MetricsRegistry::new(self.max_samples);
        let dispatcher = GenerationDispatcher::new(
            generator.clone(),
            RequestScheduler::new(self.scheduler),
            metrics.clone(),
            self.settings,
        )
        .with_prompt_builder(PromptBuilder::with_picker(Arc::new(FixedPicker(0))))
        .with_notifier(notifier.clone());

        DispatchHarness {
            dispatcher,
            generator,
            notifier,
            metrics,
        }
    }
}

/// A dispatcher plus handles to every mock behind it.
pub struct DispatchHarness {
    pub dispatcher: GenerationDispatcher,
    pub generator: Arc<MockGenerator>,
    pub notifier: Arc<RecordingNotifier>,
    pub metrics: MetricsRegistry,
}

impl DispatchHarness {
    pub fn builder() -> DispatchHarnessBuilder {
        DispatchHarnessBuilder::new()
    }

    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResponse {
        self.dispatcher.generate_content(request).await
    }
}
