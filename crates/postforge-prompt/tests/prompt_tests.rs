// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt builder behaviour across platforms, tones and goals.

use std::sync::Arc;

use postforge_core::{ContentType, FormatOptions, Goal, Platform, PlatformTarget, Tone};
use postforge_prompt::{FixedPicker, PromptBuilder, PromptInput, build_post_prompt};
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn any_platform() -> impl Strategy<Value = PlatformTarget> {
    let known: Vec<PlatformTarget> = Platform::iter().map(PlatformTarget::Known).collect();
    prop_oneof![
        proptest::sample::select(known),
        "[a-z]{3,10}".prop_map(|id| PlatformTarget::from(id.as_str())),
    ]
}

fn any_tone() -> impl Strategy<Value = Tone> {
    proptest::sample::select(Tone::iter().collect::<Vec<_>>())
}

fn any_goal() -> impl Strategy<Value = Goal> {
    proptest::sample::select(Goal::iter().collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn post_prompts_are_deterministic(
        topic in "[A-Za-z ]{1,40}",
        platform in any_platform(),
        tone in any_tone(),
        goal in any_goal(),
        use_emojis in any::<bool>(),
        use_hashtags in any::<bool>(),
    ) {
        let points = vec!["first point".to_string()];
        let input = PromptInput {
            topic: &topic,
            platform: &platform,
            tone,
            goal,
            content_type: ContentType::Content,
            key_points: &points,
            options: FormatOptions { use_emojis, use_hashtags },
        };
        let builder = PromptBuilder::new();
        let first = builder.build(&input);
        let second = builder.build(&input);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &build_post_prompt(&input));
        prop_assert!(first.contains(topic.as_str()));
        if !use_hashtags {
            prop_assert!(first.contains("Do not include hashtags."));
        }
    }
}

#[test]
fn video_script_with_fixed_picker_is_reproducible() {
    let platform = PlatformTarget::Known(Platform::Instagram);
    let input = PromptInput {
        topic: "home workouts",
        platform: &platform,
        tone: Tone::Friendly,
        goal: Goal::Community,
        content_type: ContentType::VideoScript,
        key_points: &[],
        options: FormatOptions::default(),
    };
    let builder = PromptBuilder::with_picker(Arc::new(FixedPicker(1)));
    let a = builder.build(&input);
    let b = builder.build(&input);
    assert_eq!(a, b);
    assert!(a.contains("This changed how I think about home workouts"));
    assert!(a.contains("Drop a comment if this helped"));
}

#[test]
fn linkedin_education_prompt_snapshot() {
    let platform = PlatformTarget::Known(Platform::LinkedIn);
    let points = vec![
        "pair new hires with a buddy".to_string(),
        "write things down".to_string(),
    ];
    let input = PromptInput {
        topic: "remote onboarding",
        platform: &platform,
        tone: Tone::Educational,
        goal: Goal::Education,
        content_type: ContentType::Content,
        key_points: &points,
        options: FormatOptions::default(),
    };
    let prompt = build_post_prompt(&input);
    insta::assert_snapshot!("linkedin_education_prompt", prompt);
}
