// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static per-platform capability table.
//!
//! Defined at compile time and never mutated. Lookups go through an
//! exhaustive `match`, so adding a [`Platform`] variant without a table
//! entry does not compile.

use postforge_core::{Platform, PlatformTarget, Tone};

/// Read-only constraints and style notes for one platform.
#[derive(Debug)]
pub struct PlatformConfig {
    pub platform: Platform,
    pub display_name: &'static str,
    /// Hard limit on post length, in characters.
    pub character_limit: usize,
    /// Length that tends to perform best.
    pub optimal_length: usize,
    pub max_hashtags: usize,
    pub optimal_hashtags: usize,
    pub supports_emojis: bool,
    /// One-line description of what content looks like on this platform.
    pub style: &'static str,
    /// Ordered section names for a post.
    pub structure: &'static [&'static str],
    pub viral_elements: &'static [&'static str],
    tone_adaptations: &'static [(Tone, &'static str)],
}

impl PlatformConfig {
    /// Platform-specific twist on a tone, if the table has one.
    pub fn tone_adaptation(&self, tone: Tone) -> Option<&'static str> {
        self.tone_adaptations
            .iter()
            .find(|(t, _)| *t == tone)
            .map(|(_, note)| *note)
    }

    /// Hashtag count guidance, bucketed from the platform's hashtag ceiling.
    pub fn hashtag_bucket(&self) -> String {
        match self.max_hashtags {
            0 => "no hashtags".to_string(),
            1..=3 => "1-3 hashtags".to_string(),
            4..=5 => "3-5 hashtags".to_string(),
            max => format!("5-{} hashtags", max.min(10)),
        }
    }
}

static INSTAGRAM: PlatformConfig = PlatformConfig {
    platform: Platform::Instagram,
    display_name: "Instagram",
    character_limit: 2200,
    optimal_length: 150,
    max_hashtags: 30,
    optimal_hashtags: 8,
    supports_emojis: true,
    style: "Visual-first captions: a scroll-stopping first line, short paragraphs, generous line breaks",
    structure: &["Hook", "Story", "Value", "Call to action", "Hashtags"],
    viral_elements: &["relatable moments", "behind-the-scenes", "carousel-friendly tips", "save-worthy lists"],
    tone_adaptations: &[
        (Tone::Professional, "polished but approachable, like a brand with a face"),
        (Tone::Casual, "chatty, first-person, as if texting a friend"),
        (Tone::Inspirational, "aspirational, pairs well with a strong image"),
    ],
};

static TWITTER: PlatformConfig = PlatformConfig {
    platform: Platform::Twitter,
    display_name: "Twitter/X",
    character_limit: 280,
    optimal_length: 100,
    max_hashtags: 3,
    optimal_hashtags: 2,
    supports_emojis: true,
    style: "Punchy, conversational, one idea per post; threads for anything longer",
    structure: &["Hook", "Point", "Call to action"],
    viral_elements: &["hot takes", "timely commentary", "questions", "concise insights"],
    tone_adaptations: &[
        (Tone::Humorous, "witty and quick, leaning on wordplay"),
        (Tone::Professional, "crisp and authoritative, no filler"),
    ],
};

static LINKEDIN: PlatformConfig = PlatformConfig {
    platform: Platform::LinkedIn,
    display_name: "LinkedIn",
    character_limit: 3000,
    optimal_length: 1300,
    max_hashtags: 5,
    optimal_hashtags: 3,
    supports_emojis: false,
    style: "Professional storytelling with a clear lesson, short paragraphs, insight over promotion",
    structure: &["Hook", "Context", "Insight", "Lesson", "Question"],
    viral_elements: &["career lessons", "industry insights", "data points", "contrarian observations"],
    tone_adaptations: &[
        (Tone::Casual, "conversational yet still workplace-appropriate"),
        (Tone::Educational, "structured, with numbered takeaways"),
        (Tone::Inspirational, "grounded in a real professional story"),
    ],
};

static FACEBOOK: PlatformConfig = PlatformConfig {
    platform: Platform::Facebook,
    display_name: "Facebook",
    character_limit: 63206,
    optimal_length: 80,
    max_hashtags: 3,
    optimal_hashtags: 2,
    supports_emojis: true,
    style: "Community-oriented and conversational, inviting comments and shares",
    structure: &["Hook", "Story", "Question"],
    viral_elements: &["community questions", "local relevance", "shareable stories"],
    tone_adaptations: &[
        (Tone::Friendly, "warm and neighbourly"),
        (Tone::Persuasive, "benefit-led with social proof"),
    ],
};

static TIKTOK: PlatformConfig = PlatformConfig {
    platform: Platform::TikTok,
    display_name: "TikTok",
    character_limit: 2200,
    optimal_length: 100,
    max_hashtags: 5,
    optimal_hashtags: 4,
    supports_emojis: true,
    style: "Trend-aware, energetic captions that complement a short video",
    structure: &["Hook", "Payoff", "Call to action"],
    viral_elements: &["trending sounds", "challenges", "quick transformations", "duet prompts"],
    tone_adaptations: &[
        (Tone::Humorous, "playful, meme-literate"),
        (Tone::Educational, "rapid-fire tips, one per beat"),
    ],
};

static YOUTUBE: PlatformConfig = PlatformConfig {
    platform: Platform::YouTube,
    display_name: "YouTube",
    character_limit: 5000,
    optimal_length: 300,
    max_hashtags: 15,
    optimal_hashtags: 3,
    supports_emojis: true,
    style: "Search-friendly descriptions: keyword-rich opening, timestamps, links",
    structure: &["Summary", "Key moments", "Links", "Call to action"],
    viral_elements: &["searchable keywords", "timestamps", "series hooks"],
    tone_adaptations: &[(Tone::Educational, "clear and thorough, tutorial style")],
};

static PINTEREST: PlatformConfig = PlatformConfig {
    platform: Platform::Pinterest,
    display_name: "Pinterest",
    character_limit: 500,
    optimal_length: 200,
    max_hashtags: 20,
    optimal_hashtags: 5,
    supports_emojis: true,
    style: "Keyword-rich, idea-focused descriptions that help a pin get discovered",
    structure: &["Idea", "Benefit", "Call to action"],
    viral_elements: &["how-to ideas", "seasonal inspiration", "step-by-step guides"],
    tone_adaptations: &[(Tone::Inspirational, "dreamy and idea-driven")],
};

static THREADS: PlatformConfig = PlatformConfig {
    platform: Platform::Threads,
    display_name: "Threads",
    character_limit: 500,
    optimal_length: 150,
    max_hashtags: 1,
    optimal_hashtags: 1,
    supports_emojis: true,
    style: "Casual, conversation-starting posts with an authentic voice",
    structure: &["Hook", "Thought", "Question"],
    viral_elements: &["open questions", "personal takes", "light humour"],
    tone_adaptations: &[(Tone::Casual, "loose and personal")],
};

/// Capability record for a known platform.
pub fn config_for(platform: Platform) -> &'static PlatformConfig {
    match platform {
        Platform::Instagram => &INSTAGRAM,
        Platform::Twitter => &TWITTER,
        Platform::LinkedIn => &LINKEDIN,
        Platform::Facebook => &FACEBOOK,
        Platform::TikTok => &TIKTOK,
        Platform::YouTube => &YOUTUBE,
        Platform::Pinterest => &PINTEREST,
        Platform::Threads => &THREADS,
    }
}

/// Capability record for a caller-supplied target; `None` for unrecognized ids.
///
/// Callers treat `None` as "skip the limit checks", never as a failure.
pub fn capabilities(target: &PlatformTarget) -> Option<&'static PlatformConfig> {
    target.platform().map(config_for)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_platform_has_a_consistent_entry() {
        for platform in Platform::iter() {
            let config = config_for(platform);
            assert_eq!(config.platform, platform);
            assert!(config.optimal_length <= config.character_limit);
            assert!(config.optimal_hashtags <= config.max_hashtags);
            assert!(!config.structure.is_empty());
            assert!(!config.viral_elements.is_empty());
        }
    }

    #[test]
    fn known_limits() {
        assert_eq!(config_for(Platform::Twitter).character_limit, 280);
        assert_eq!(config_for(Platform::Instagram).max_hashtags, 30);
        assert!(!config_for(Platform::LinkedIn).supports_emojis);
    }

    #[test]
    fn unrecognized_target_has_no_capabilities() {
        assert!(capabilities(&PlatformTarget::from("myspace")).is_none());
        assert_eq!(
            capabilities(&PlatformTarget::from("tiktok")).map(|c| c.character_limit),
            Some(2200)
        );
    }

    #[test]
    fn hashtag_buckets() {
        assert_eq!(config_for(Platform::Twitter).hashtag_bucket(), "1-3 hashtags");
        assert_eq!(config_for(Platform::Threads).hashtag_bucket(), "1-3 hashtags");
        assert_eq!(config_for(Platform::LinkedIn).hashtag_bucket(), "3-5 hashtags");
        assert_eq!(config_for(Platform::TikTok).hashtag_bucket(), "3-5 hashtags");
        assert_eq!(config_for(Platform::Instagram).hashtag_bucket(), "5-10 hashtags");
    }

    #[test]
    fn tone_adaptation_lookup() {
        assert!(config_for(Platform::Twitter).tone_adaptation(Tone::Humorous).is_some());
        assert!(config_for(Platform::Twitter).tone_adaptation(Tone::Casual).is_none());
    }
}
