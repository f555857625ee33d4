// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Video-script prompts with a timed hook / value / call-to-action skeleton.
//!
//! One sample hook and one sample call to action are chosen per prompt. The
//! choice goes through a [`VariantPicker`] so tests can pin it.

use std::sync::Mutex;

use postforge_core::Platform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::builder::{PromptInput, goal_guidance, hashtag_requirement, push_key_points, tone_guidance};
use crate::platform::capabilities;

/// Chooses an index into a non-empty list of variants.
pub trait VariantPicker: Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Thread-local RNG; different output on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl VariantPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Seeded RNG; the same seed yields the same sequence of picks.
#[derive(Debug)]
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl VariantPicker for SeededPicker {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.gen_range(0..len)
    }
}

/// Always picks the same position (wrapped to the list length).
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl VariantPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

/// Sample hooks per platform; `{topic}` is substituted.
fn hooks(platform: Option<Platform>) -> &'static [&'static str] {
    match platform {
        Some(Platform::TikTok) => &[
            "POV: you just discovered the truth about {topic}",
            "Stop scrolling if you care about {topic}",
            "Nobody talks about this side of {topic}",
            "3 things I wish I knew about {topic}",
        ],
        Some(Platform::Instagram) => &[
            "Save this before you forget: {topic} made simple",
            "This changed how I think about {topic}",
            "The {topic} mistake almost everyone makes",
        ],
        Some(Platform::YouTube) => &[
            "In the next minute you'll understand {topic} better than most",
            "Here's what the experts won't tell you about {topic}",
            "I tested {topic} so you don't have to",
        ],
        Some(Platform::LinkedIn) => &[
            "One lesson about {topic} that reshaped my career",
            "Most teams get {topic} wrong. Here's why.",
        ],
        _ => &[
            "Here's something about {topic} you need to hear",
            "Quick question: what do you really know about {topic}?",
            "Let's talk about {topic}",
        ],
    }
}

fn calls_to_action(platform: Option<Platform>) -> &'static [&'static str] {
    match platform {
        Some(Platform::TikTok) => &[
            "Follow for part 2",
            "Duet this with your own take",
            "Comment your experience below",
        ],
        Some(Platform::Instagram) => &[
            "Save this and share it with a friend who needs it",
            "Drop a comment if this helped",
            "Follow for more tips like this",
        ],
        Some(Platform::YouTube) => &[
            "Subscribe and hit the bell so you don't miss the next one",
            "Tell me in the comments what you want covered next",
        ],
        Some(Platform::LinkedIn) => &[
            "Share your perspective in the comments",
            "Repost if your network should see this",
        ],
        _ => &[
            "Follow for more",
            "Share this with someone who needs it",
            "Let me know what you think",
        ],
    }
}

/// Total script length in seconds.
fn duration_secs(platform: Option<Platform>) -> u32 {
    match platform {
        Some(Platform::TikTok | Platform::Instagram) => 30,
        Some(Platform::YouTube) => 60,
        _ => 45,
    }
}

/// Video-script prompt: timed sections plus one picked hook and CTA.
pub fn build_video_script_prompt(input: &PromptInput<'_>, picker: &dyn VariantPicker) -> String {
    let platform = input.platform.platform();
    let config = capabilities(input.platform);
    let total = duration_secs(platform);
    let cta_start = total - 5;

    let hook_list = hooks(platform);
    let cta_list = calls_to_action(platform);
    let hook = hook_list[picker.pick(hook_list.len()) % hook_list.len()].replace("{topic}", input.topic);
    let cta = cta_list[picker.pick(cta_list.len()) % cta_list.len()];

    let (voice, approach) = tone_guidance(input.tone);
    let (focus, strategy) = goal_guidance(input.goal);
    let platform_name = config
        .map(|c| c.display_name.to_string())
        .unwrap_or_else(|| input.platform.label());

    let mut lines = vec![
        format!(
            "Write a {total}-second {platform_name} video script about \"{}\".",
            input.topic
        ),
        String::new(),
        format!("TONE: {voice}. {approach}."),
        format!("GOAL: {focus}. {strategy}."),
    ];
    push_key_points(&mut lines, input.key_points);

    lines.push("SCRIPT STRUCTURE:".to_string());
    lines.push(format!(
        "[0-3s] HOOK: Grab attention in the first breath. Example: \"{hook}\""
    ));
    lines.push(format!(
        "[3-{cta_start}s] VALUE: Deliver 2-3 concrete points, one visual per point."
    ));
    lines.push(format!(
        "[{cta_start}-{total}s] CALL TO ACTION: Close with a clear ask. Example: \"{cta}\""
    ));

    lines.push("FORMAT REQUIREMENTS:".to_string());
    lines.push("- Mark on-screen text and visual cues in [brackets].".to_string());
    lines.push("- Write spoken lines the way they should be said aloud.".to_string());
    lines.push(format!("- Caption: {}", hashtag_requirement(config, input.options)));

    lines.push("Return only the script.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use postforge_core::{ContentType, FormatOptions, Goal, PlatformTarget, Tone};

    fn input<'a>(platform: &'a PlatformTarget) -> PromptInput<'a> {
        PromptInput {
            topic: "meal prep",
            platform,
            tone: Tone::Casual,
            goal: Goal::Engagement,
            content_type: ContentType::VideoScript,
            key_points: &[],
            options: FormatOptions::default(),
        }
    }

    #[test]
    fn fixed_picker_selects_first_variants() {
        let platform = PlatformTarget::Known(Platform::TikTok);
        let prompt = build_video_script_prompt(&input(&platform), &FixedPicker(0));
        assert!(prompt.starts_with("Write a 30-second TikTok video script"));
        assert!(prompt.contains("POV: you just discovered the truth about meal prep"));
        assert!(prompt.contains("\"Follow for part 2\""));
        assert!(prompt.contains("[25-30s] CALL TO ACTION"));
    }

    #[test]
    fn seeded_pickers_agree() {
        let platform = PlatformTarget::Known(Platform::Instagram);
        let a = build_video_script_prompt(&input(&platform), &SeededPicker::new(42));
        let b = build_video_script_prompt(&input(&platform), &SeededPicker::new(42));
        assert_eq!(a, b);
    }

    #[test]
    fn random_picker_always_uses_a_known_hook() {
        let platform = PlatformTarget::Known(Platform::YouTube);
        for _ in 0..20 {
            let prompt = build_video_script_prompt(&input(&platform), &RandomPicker);
            let matched = hooks(Some(Platform::YouTube))
                .iter()
                .any(|h| prompt.contains(&h.replace("{topic}", "meal prep")));
            assert!(matched);
            assert!(prompt.contains("60-second"));
        }
    }

    #[test]
    fn unrecognized_platform_gets_generic_skeleton() {
        let platform = PlatformTarget::from("vimeo");
        let prompt = build_video_script_prompt(&input(&platform), &FixedPicker(2));
        assert!(prompt.contains("45-second vimeo video script"));
        assert!(prompt.contains("Let's talk about meal prep"));
        assert!(prompt.contains("Let me know what you think"));
    }

    #[test]
    fn fixed_picker_wraps() {
        assert_eq!(FixedPicker(7).pick(3), 1);
    }
}
