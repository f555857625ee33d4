// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end dispatcher behaviour against a scripted generator.

use std::time::Duration;

use postforge_core::types::{ContentUpdate, NewContent};
use postforge_core::{
    ContentStore, ContentType, ErrorKind, GenerationRequest, NotificationLevel, Platform, PlatformTarget,
    RemoteReply, Tone, TokenUsage,
};
use postforge_dispatch::GENERATE_CONTENT;
use postforge_fallback::generate_fallback;
use postforge_resilience::RetryPolicy;
use postforge_test_utils::{DispatchHarness, MemoryStore, MockGenerator, MockReply};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn empty_prompt_is_rejected_without_remote_call() {
    let harness = DispatchHarness::builder().build();
    let request = GenerationRequest::new("").with_content_type(ContentType::Content);

    let response = harness.generate(&request).await;

    assert_eq!(response.content, "");
    assert_eq!(response.error_kind, Some(ErrorKind::ValidationError));
    assert!(!response.fallback_used);
    assert_eq!(harness.generator.call_count(), 0);
    assert!(harness.metrics.summary(GENERATE_CONTENT).is_none());
}

#[tokio::test(start_paused = true)]
async fn whitespace_prompt_is_rejected_too() {
    let harness = DispatchHarness::builder().build();
    let response = harness.generate(&GenerationRequest::new("   \n")).await;
    assert_eq!(response.error_kind, Some(ErrorKind::ValidationError));
    assert_eq!(harness.generator.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn empty_content_falls_back_to_instagram_template() {
    let harness = DispatchHarness::builder()
        .with_replies(vec![MockReply::empty()])
        .build();
    let request = GenerationRequest::new("sustainable living").with_platform("instagram");

    let response = harness.generate(&request).await;

    let expected = generate_fallback(
        "sustainable living",
        &PlatformTarget::Known(Platform::Instagram),
        Tone::Professional,
        true,
        true,
    );
    assert_eq!(response.content, expected);
    assert!(response.fallback_used);
    assert!(response.error.is_some());
    assert!(response.usage.is_empty());
    // Empty content is not retried.
    assert_eq!(harness.generator.call_count(), 1);
    assert_eq!(harness.notifier.count(NotificationLevel::Warning), 1);
}

#[tokio::test(start_paused = true)]
async fn never_resolving_call_settles_at_the_timeout() {
    let harness = DispatchHarness::builder()
        .with_generator(MockGenerator::never_resolves())
        .build();
    let request = GenerationRequest::new("remote work").with_platform("linkedin");
    let start = Instant::now();

    let response = harness.generate(&request).await;

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(15), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(16), "{elapsed:?}");
    assert_eq!(response.error_kind, Some(ErrorKind::GenerationTimeout));
    assert!(response.fallback_used);
    assert!(!response.content.is_empty());
    // Timeouts are not retried.
    assert_eq!(harness.generator.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn queued_requests_are_bounded_by_their_own_timeout() {
    let harness = DispatchHarness::builder()
        .with_generator(MockGenerator::never_resolves())
        .build();
    let request = GenerationRequest::new("remote work").with_platform("linkedin");
    let (harness, request) = (&harness, &request);

    let timed = || async move {
        let start = Instant::now();
        let response = harness.generate(request).await;
        (start.elapsed(), response)
    };
    // Concurrency is 2, so the third request waits in the queue behind two hung calls.
    let (a, b, c) = tokio::join!(timed(), timed(), timed());

    for (elapsed, response) in [a, b, c] {
        assert!(elapsed >= Duration::from_secs(15), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(16), "{elapsed:?}");
        assert_eq!(response.error_kind, Some(ErrorKind::GenerationTimeout));
        assert!(response.fallback_used);
    }
}

#[tokio::test(start_paused = true)]
async fn custom_timeout_is_honoured() {
    let harness = DispatchHarness::builder()
        .with_generator(MockGenerator::never_resolves())
        .with_timeout(Duration::from_secs(2))
        .build();
    let start = Instant::now();
    let response = harness.generate(&GenerationRequest::new("tea")).await;
    assert!(start.elapsed() < Duration::from_secs(3));
    assert_eq!(response.error_kind, Some(ErrorKind::GenerationTimeout));
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_with_backoff() {
    let harness = DispatchHarness::builder()
        .with_replies(vec![
            MockReply::fail(ErrorKind::RateLimit, "rate limit exceeded"),
            MockReply::fail(ErrorKind::ServiceDisruption, "503 unavailable"),
            MockReply::content("  Fresh post about tea  "),
        ])
        .build();
    let start = Instant::now();

    let response = harness.generate(&GenerationRequest::new("tea")).await;

    assert!(response.is_success());
    assert_eq!(response.content, "Fresh post about tea");
    assert!(!response.fallback_used);
    assert_eq!(harness.generator.call_count(), 3);
    assert!(start.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_fall_back_with_last_error() {
    let harness = DispatchHarness::builder()
        .with_generator(
            MockGenerator::new().when_exhausted(MockReply::fail(ErrorKind::NetworkError, "connection reset")),
        )
        .build();

    let response = harness
        .generate(&GenerationRequest::new("tea").with_platform(Platform::Twitter))
        .await;

    assert_eq!(harness.generator.call_count(), 3);
    assert_eq!(response.error_kind, Some(ErrorKind::NetworkError));
    assert!(response.error.as_deref().unwrap().contains("connection reset"));
    let notes = harness.notifier.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, ErrorKind::NetworkError.advisory());
}

#[tokio::test(start_paused = true)]
async fn retries_can_be_disabled() {
    let harness = DispatchHarness::builder()
        .with_replies(vec![MockReply::fail(ErrorKind::RateLimit, "429")])
        .with_retry(RetryPolicy::none())
        .build();
    let response = harness.generate(&GenerationRequest::new("tea")).await;
    assert_eq!(harness.generator.call_count(), 1);
    assert_eq!(response.error_kind, Some(ErrorKind::RateLimit));
}

#[tokio::test(start_paused = true)]
async fn error_reply_without_content_is_classified() {
    let harness = DispatchHarness::builder()
        .with_replies(vec![MockReply::Reply(RemoteReply::error("request flagged by moderation"))])
        .build();
    let response = harness.generate(&GenerationRequest::new("tea")).await;
    assert_eq!(response.error_kind, Some(ErrorKind::ContentModeration));
    assert_eq!(harness.generator.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn success_uses_built_prompt_and_estimates_usage() {
    let harness = DispatchHarness::builder()
        .with_replies(vec![MockReply::content("Generated caption")])
        .build();
    let request = GenerationRequest::new("home workouts")
        .with_platform("tiktok")
        .with_tone(Tone::Humorous)
        .with_key_points(vec!["no equipment".into()]);

    let response = harness.generate(&request).await;

    let prompts = harness.generator.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0], harness.dispatcher.build_prompt(&request));
    assert!(prompts[0].contains("no equipment"));
    assert_eq!(response.usage, TokenUsage::estimate(&prompts[0], "Generated caption"));
    assert_eq!(response.platform, Some(PlatformTarget::Known(Platform::TikTok)));
    assert!(harness.notifier.notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn video_scripts_use_the_harness_picker() {
    let harness = DispatchHarness::builder().build();
    let request = GenerationRequest::new("meal prep")
        .with_platform("tiktok")
        .with_content_type(ContentType::VideoScript);
    let prompt = harness.dispatcher.build_prompt(&request);
    assert!(prompt.contains("POV: you just discovered the truth about meal prep"));
}

#[tokio::test(start_paused = true)]
async fn concurrent_requests_share_the_queue_ceiling() {
    let reply = RemoteReply::content("ok");
    let harness = DispatchHarness::builder()
        .with_replies(vec![
            MockReply::Delayed(Duration::from_millis(100), reply.clone()),
            MockReply::Delayed(Duration::from_millis(100), reply.clone()),
            MockReply::Delayed(Duration::from_millis(100), reply),
        ])
        .build();
    let request = GenerationRequest::new("tea");
    let start = Instant::now();

    let (a, b, c) = tokio::join!(
        harness.generate(&request),
        harness.generate(&request),
        harness.generate(&request)
    );

    assert!(a.is_success() && b.is_success() && c.is_success());
    // Two run in the first batch; the third waits out the batch delay.
    assert!(start.elapsed() >= Duration::from_millis(1200), "{:?}", start.elapsed());
    assert_eq!(harness.metrics.summary(GENERATE_CONTENT).unwrap().count, 3);
}

#[tokio::test(start_paused = true)]
async fn generated_posts_can_be_kept_in_a_store() {
    let harness = DispatchHarness::builder()
        .with_replies(vec![MockReply::content("Morning tea, zero regrets #tea")])
        .build();
    let store = MemoryStore::new();
    let request = GenerationRequest::new("tea").with_platform(Platform::Instagram);
    let response = harness.generate(&request).await;

    let saved = store
        .save_content(NewContent {
            title: "tea".into(),
            body: response.content.clone(),
            platform: response.platform.clone(),
            content_type: request.content_type,
        })
        .await
        .unwrap();
    assert_eq!(store.list_content().await.unwrap(), vec![saved.clone()]);

    let updated = store
        .update_content(
            &saved.id,
            ContentUpdate {
                title: Some("Tea, revisited".into()),
                body: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.body, response.content);

    store.delete_content(&saved.id).await.unwrap();
    assert!(store.is_empty().await);
    assert!(store.delete_content(&saved.id).await.is_err());
}
