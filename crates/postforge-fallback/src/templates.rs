// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-platform fallback templates.

use postforge_core::{Platform, PlatformTarget, Tone};
use postforge_prompt::capabilities;

/// Every emoji a template may inject. Nothing outside this set is ever added.
pub const EMOJI_SET: &[char] = &['✨', '🚀', '💡', '🔥', '🌱', '🙌', '📌', '🎯', '👉', '💬', '✅'];

/// Stand-in used when the topic is blank.
pub const FALLBACK_TOPIC: &str = "this topic";

/// Hashtag ceiling for fallback text, even where the platform allows more.
const MAX_FALLBACK_HASHTAGS: usize = 5;
/// Hashtag count for unrecognized platforms.
const GENERIC_HASHTAGS: usize = 3;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "your", "you", "are", "how", "why", "what",
    "from", "into", "about", "our", "its",
];

/// One line of a template: optional emoji prefix and text with `{topic}`.
type Line = (Option<char>, &'static str);

struct Template {
    body: &'static [Line],
    /// Separator between lines; short-form platforms keep everything tight.
    separator: &'static str,
    platform_tags: &'static [&'static str],
}

static INSTAGRAM: Template = Template {
    body: &[
        (Some('🌱'), "Small, steady steps make {topic} feel a lot less overwhelming."),
        (Some('📌'), "Start with one change this week and build from there."),
        (Some('💬'), "Save this for later and tell us how you're approaching {topic}."),
    ],
    separator: "\n\n",
    platform_tags: &["instagood", "tips", "community"],
};

static TWITTER: Template = Template {
    body: &[
        (Some('👉'), "One takeaway on {topic}: start small, stay consistent."),
        (None, "What's your take?"),
    ],
    separator: "\n",
    platform_tags: &["trending"],
};

static LINKEDIN: Template = Template {
    body: &[
        (None, "The teams that get {topic} right rarely start with a grand plan."),
        (
            None,
            "They pick one measurable improvement, review it honestly, and iterate.",
        ),
        (None, "How is your organization thinking about {topic}?"),
    ],
    separator: "\n\n",
    platform_tags: &["leadership", "careergrowth"],
};

static FACEBOOK: Template = Template {
    body: &[
        (Some('🙌'), "We'd love to hear how {topic} shows up in your day-to-day."),
        (Some('💬'), "Share your experience in the comments."),
    ],
    separator: "\n\n",
    platform_tags: &["community"],
};

static TIKTOK: Template = Template {
    body: &[
        (Some('🔥'), "Things nobody tells you about {topic}."),
        (Some('✅'), "Try one tip today and report back."),
    ],
    separator: "\n",
    platform_tags: &["fyp", "learnontiktok"],
};

static YOUTUBE: Template = Template {
    body: &[
        (Some('🎯'), "In this video we break down {topic} step by step."),
        (Some('📌'), "Timestamps and resources are below."),
        (Some('👉'), "Subscribe for more on {topic}."),
    ],
    separator: "\n\n",
    platform_tags: &["youtube", "howto"],
};

static PINTEREST: Template = Template {
    body: &[
        (Some('💡'), "Ideas and inspiration for {topic}."),
        (Some('📌'), "Save this pin for when you're ready to start."),
    ],
    separator: "\n",
    platform_tags: &["ideas", "inspiration"],
};

static THREADS: Template = Template {
    body: &[
        (Some('💬'), "Honest question: what's the hardest part of {topic} for you?"),
    ],
    separator: "\n",
    platform_tags: &["threads"],
};

static GENERIC: Template = Template {
    body: &[
        (Some('🚀'), "Here's a quick thought on {topic}."),
        (Some('💬'), "Let us know what you think."),
    ],
    separator: "\n\n",
    platform_tags: &["socialmedia"],
};

fn template_for(platform: Option<Platform>) -> &'static Template {
    match platform {
        Some(Platform::Instagram) => &INSTAGRAM,
        Some(Platform::Twitter) => &TWITTER,
        Some(Platform::LinkedIn) => &LINKEDIN,
        Some(Platform::Facebook) => &FACEBOOK,
        Some(Platform::TikTok) => &TIKTOK,
        Some(Platform::YouTube) => &YOUTUBE,
        Some(Platform::Pinterest) => &PINTEREST,
        Some(Platform::Threads) => &THREADS,
        None => &GENERIC,
    }
}

/// Opening line for a tone, with `{topic}` placeholder.
fn tone_opening(tone: Tone) -> Line {
    match tone {
        Tone::Professional => (Some('💡'), "A closer look at {topic}."),
        Tone::Casual => (Some('👉'), "Let's talk about {topic} for a sec."),
        Tone::Friendly => (Some('🙌'), "Hey friends! Today we're chatting about {topic}."),
        Tone::Humorous => (
            Some('🔥'),
            "Plot twist: {topic} is more interesting than it sounds.",
        ),
        Tone::Inspirational => (
            Some('✨'),
            "Every big change starts small, and {topic} is no exception.",
        ),
        Tone::Educational => (Some('📌'), "Here's a quick guide to {topic}."),
        Tone::Persuasive => (
            Some('🎯'),
            "If you've been putting off {topic}, this is your sign to start.",
        ),
    }
}

/// Fallback post for `topic` on `platform`.
///
/// The same arguments always produce the same text. With `use_hashtags`
/// off the result contains no `#`; with `use_emojis` off it contains no
/// character from [`EMOJI_SET`].
pub fn generate_fallback(
    topic: &str,
    platform: &PlatformTarget,
    tone: Tone,
    use_emojis: bool,
    use_hashtags: bool,
) -> String {
    // LinkedIn copy stays emoji-free regardless of the flag.
    let emojis = use_emojis && capabilities(platform).is_none_or(|c| c.supports_emojis);
    let topic = clean_topic(topic, emojis);
    let known = platform.platform();
    let template = template_for(known);

    let mut lines: Vec<String> = std::iter::once(tone_opening(tone))
        .chain(template.body.iter().copied())
        .map(|(emoji, text)| render_line(emoji.filter(|_| emojis), text, &topic))
        .collect();

    if use_hashtags {
        let limit = capabilities(platform)
            .map(|c| c.max_hashtags.min(MAX_FALLBACK_HASHTAGS))
            .unwrap_or(GENERIC_HASHTAGS);
        let tags = hashtags(&topic, template.platform_tags, limit);
        if !tags.is_empty() {
            lines.push(tags.join(" "));
        }
    }

    lines.join(template.separator)
}

fn render_line(emoji: Option<char>, text: &str, topic: &str) -> String {
    let text = text.replace("{topic}", topic);
    match emoji {
        Some(e) => format!("{e} {text}"),
        None => text,
    }
}

/// Topic text safe to splice into a template: no `#`, no bank emojis when
/// emojis are off, never empty.
fn clean_topic(topic: &str, use_emojis: bool) -> String {
    let cleaned: String = topic
        .chars()
        .filter(|c| *c != '#')
        .filter(|c| use_emojis || !EMOJI_SET.contains(c))
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        FALLBACK_TOPIC.to_string()
    } else {
        cleaned
    }
}

/// Hashtag words derived from a topic: the joined phrase first, then each
/// significant word. Lowercase ASCII alphanumerics only.
pub fn topic_hashtags(topic: &str) -> Vec<String> {
    let words: Vec<String> = topic
        .split(|c: char| !c.is_ascii_alphanumeric())
        .map(str::to_ascii_lowercase)
        .filter(|w| w.len() >= 3 && !STOPWORDS.contains(&w.as_str()))
        .collect();

    let mut tags = Vec::new();
    if words.len() > 1 {
        tags.push(words.concat());
    }
    tags.extend(words);
    tags
}

fn hashtags(topic: &str, platform_tags: &[&str], limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let candidates = topic_hashtags(topic)
        .into_iter()
        .chain(platform_tags.iter().map(|t| t.to_string()));
    for tag in candidates {
        if seen.len() == limit {
            break;
        }
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen.into_iter().map(|t| format!("#{t}")).collect()
}
