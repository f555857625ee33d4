// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt construction for post content.
//!
//! Post prompts are a pure function of their input. Video scripts go through
//! [`crate::video`], which mixes in one picked hook and call to action.

use std::sync::Arc;

use postforge_core::{ContentType, FormatOptions, Goal, PlatformTarget, Tone};
use tracing::debug;

use crate::platform::{PlatformConfig, capabilities};
use crate::video::{RandomPicker, VariantPicker, build_video_script_prompt};

/// Everything the builder needs for one prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    /// Non-empty topic; callers check this before building.
    pub topic: &'a str,
    pub platform: &'a PlatformTarget,
    pub tone: Tone,
    pub goal: Goal,
    pub content_type: ContentType,
    pub key_points: &'a [String],
    pub options: FormatOptions,
}

/// Voice and approach text for a tone.
pub(crate) fn tone_guidance(tone: Tone) -> (&'static str, &'static str) {
    match tone {
        Tone::Professional => (
            "Authoritative, credible and polished",
            "Lead with expertise and keep claims precise",
        ),
        Tone::Casual => (
            "Relaxed, conversational and human",
            "Write the way people talk, contractions welcome",
        ),
        Tone::Friendly => (
            "Warm, upbeat and welcoming",
            "Speak directly to the reader and make them feel included",
        ),
        Tone::Humorous => (
            "Playful, witty and light",
            "Use one clear joke or twist without undercutting the message",
        ),
        Tone::Inspirational => (
            "Uplifting, motivating and hopeful",
            "Paint the better outcome and show the first step toward it",
        ),
        Tone::Educational => (
            "Clear, patient and informative",
            "Teach one useful thing with a concrete example",
        ),
        Tone::Persuasive => (
            "Confident, benefit-driven and compelling",
            "Address an objection and end with a reason to act now",
        ),
    }
}

/// Focus and strategy text for a goal.
pub(crate) fn goal_guidance(goal: Goal) -> (&'static str, &'static str) {
    match goal {
        Goal::Engagement => (
            "Maximize comments, likes and shares",
            "Ask a question or invite an opinion the audience wants to answer",
        ),
        Goal::Awareness => (
            "Make the topic memorable to people seeing it for the first time",
            "Lead with the single most surprising or relatable fact",
        ),
        Goal::Conversions => (
            "Drive a specific action such as a sign-up or purchase",
            "State the benefit plainly and finish with one unambiguous call to action",
        ),
        Goal::Traffic => (
            "Send readers to a link for the full story",
            "Tease the payoff without giving all of it away",
        ),
        Goal::Education => (
            "Leave the reader knowing something new",
            "Break the idea into short, skimmable steps",
        ),
        Goal::Community => (
            "Strengthen the relationship with existing followers",
            "Celebrate the audience and invite them to share their own experience",
        ),
    }
}

/// Builds prompts; holds the picker used for video-script variety.
#[derive(Clone)]
pub struct PromptBuilder {
    picker: Arc<dyn VariantPicker>,
}

impl std::fmt::Debug for PromptBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptBuilder").finish_non_exhaustive()
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    /// Builder whose video scripts pick hooks at random.
    pub fn new() -> Self {
        Self {
            picker: Arc::new(RandomPicker),
        }
    }

    /// Builder with an explicit picker, for reproducible video scripts.
    pub fn with_picker(picker: Arc<dyn VariantPicker>) -> Self {
        Self { picker }
    }

    pub fn build(&self, input: &PromptInput<'_>) -> String {
        let prompt = match input.content_type {
            ContentType::Content => build_post_prompt(input),
            ContentType::VideoScript => build_video_script_prompt(input, self.picker.as_ref()),
        };
        debug!(
            platform = %input.platform,
            content_type = %input.content_type,
            chars = prompt.len(),
            "built generation prompt"
        );
        prompt
    }
}

/// Deterministic post prompt for the given input.
pub fn build_post_prompt(input: &PromptInput<'_>) -> String {
    let config = capabilities(input.platform);
    let (voice, approach) = tone_guidance(input.tone);
    let (focus, strategy) = goal_guidance(input.goal);

    let mut lines = Vec::new();
    match config {
        Some(c) => {
            lines.push(format!(
                "Create a {} post about \"{}\" in a {} tone.",
                c.display_name, input.topic, input.tone
            ));
            lines.push(String::new());
            lines.push(format!("PLATFORM STYLE: {}.", c.style));
        }
        None => {
            lines.push(format!(
                "Create a social media post for {} about \"{}\" in a {} tone.",
                input.platform.label(),
                input.topic,
                input.tone
            ));
            lines.push(String::new());
            lines.push(
                "PLATFORM STYLE: Clear, engaging copy that reads well on any social network."
                    .to_string(),
            );
        }
    }

    let adaptation = config.and_then(|c| c.tone_adaptation(input.tone));
    match adaptation {
        Some(note) => lines.push(format!("TONE: {voice}. {approach}. On this platform: {note}.")),
        None => lines.push(format!("TONE: {voice}. {approach}.")),
    }
    lines.push(format!("GOAL: {focus}. {strategy}."));

    push_key_points(&mut lines, input.key_points);

    lines.push("FORMAT REQUIREMENTS:".to_string());
    lines.push(format!("- {}", length_requirement(config)));
    lines.push(format!("- {}", hashtag_requirement(config, input.options)));
    lines.push(format!("- {}", emoji_requirement(config, input.options)));

    if let Some(c) = config {
        lines.push(format!("STRUCTURE: {}", c.structure.join(" -> ")));
        lines.push(format!(
            "HIGH-PERFORMING ELEMENTS: {}",
            c.viral_elements.join(", ")
        ));
    }

    lines.push("Return only the post text, ready to publish.".to_string());
    lines.join("\n")
}

pub(crate) fn push_key_points(lines: &mut Vec<String>, key_points: &[String]) {
    let points: Vec<&str> = key_points
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if points.is_empty() {
        return;
    }
    lines.push("KEY POINTS TO COVER:".to_string());
    lines.extend(points.into_iter().map(|p| format!("- {p}")));
}

fn length_requirement(config: Option<&PlatformConfig>) -> String {
    match config {
        Some(c) => format!(
            "Stay under {} characters; aim for about {}.",
            c.character_limit, c.optimal_length
        ),
        None => "Keep it concise, a few short paragraphs at most.".to_string(),
    }
}

pub(crate) fn hashtag_requirement(config: Option<&PlatformConfig>, options: FormatOptions) -> String {
    if !options.use_hashtags {
        return "Do not include hashtags.".to_string();
    }
    match config {
        Some(c) if c.max_hashtags == 0 => "Do not include hashtags.".to_string(),
        Some(c) => format!("Include {} (never more than {}).", c.hashtag_bucket(), c.max_hashtags),
        None => "Include 3-5 relevant hashtags.".to_string(),
    }
}

pub(crate) fn emoji_requirement(config: Option<&PlatformConfig>, options: FormatOptions) -> String {
    if !options.use_emojis {
        return "Do not use emojis.".to_string();
    }
    match config {
        Some(c) if !c.supports_emojis => "Use emojis sparingly, if at all.".to_string(),
        _ => "Use a few emojis where they add meaning (2-4 at most).".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postforge_core::Platform;

    fn input<'a>(topic: &'a str, platform: &'a PlatformTarget) -> PromptInput<'a> {
        PromptInput {
            topic,
            platform,
            tone: Tone::Professional,
            goal: Goal::Engagement,
            content_type: ContentType::Content,
            key_points: &[],
            options: FormatOptions::default(),
        }
    }

    #[test]
    fn post_prompt_contains_platform_constraints() {
        let platform = PlatformTarget::Known(Platform::Twitter);
        let prompt = build_post_prompt(&input("remote work", &platform));
        assert!(prompt.contains("Twitter/X"));
        assert!(prompt.contains("\"remote work\""));
        assert!(prompt.contains("Stay under 280 characters"));
        assert!(prompt.contains("Include 1-3 hashtags (never more than 3)."));
    }

    #[test]
    fn unrecognized_platform_uses_generic_phrasing() {
        let platform = PlatformTarget::from("mastodon");
        let prompt = build_post_prompt(&input("open source", &platform));
        assert!(prompt.contains("social media post for mastodon"));
        assert!(prompt.contains("Keep it concise"));
        assert!(!prompt.contains("STRUCTURE:"));
    }

    #[test]
    fn flags_switch_off_hashtags_and_emojis() {
        let platform = PlatformTarget::Known(Platform::Instagram);
        let mut i = input("coffee", &platform);
        i.options = FormatOptions {
            use_emojis: false,
            use_hashtags: false,
        };
        let prompt = build_post_prompt(&i);
        assert!(prompt.contains("Do not include hashtags."));
        assert!(prompt.contains("Do not use emojis."));
    }

    #[test]
    fn key_points_are_listed_and_blank_ones_skipped() {
        let platform = PlatformTarget::Known(Platform::LinkedIn);
        let points = vec!["hiring is up".to_string(), "  ".to_string()];
        let mut i = input("tech jobs", &platform);
        i.key_points = &points;
        let prompt = build_post_prompt(&i);
        assert!(prompt.contains("KEY POINTS TO COVER:\n- hiring is up\nFORMAT"));
    }

    #[test]
    fn platform_tone_adaptation_is_appended() {
        let platform = PlatformTarget::Known(Platform::Twitter);
        let mut i = input("mondays", &platform);
        i.tone = Tone::Humorous;
        let prompt = build_post_prompt(&i);
        assert!(prompt.contains("On this platform: witty and quick"));
    }

    #[test]
    fn linkedin_discourages_emojis() {
        let platform = PlatformTarget::Known(Platform::LinkedIn);
        let prompt = build_post_prompt(&input("leadership", &platform));
        assert!(prompt.contains("Use emojis sparingly"));
    }
}
