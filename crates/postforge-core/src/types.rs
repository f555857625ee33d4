// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the prompt, dispatch, and storage layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::ErrorKind;

/// A target social network with its own content constraints.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    #[strum(to_string = "twitter", serialize = "x")]
    Twitter,
    #[strum(to_string = "linkedin")]
    LinkedIn,
    Facebook,
    #[strum(to_string = "tiktok")]
    TikTok,
    #[strum(to_string = "youtube")]
    YouTube,
    Pinterest,
    Threads,
}

/// A platform id as supplied by a caller.
///
/// Known ids resolve to a [`Platform`]; anything else is kept verbatim so
/// downstream code can fall back to generic phrasing instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlatformTarget {
    Known(Platform),
    Unrecognized(String),
}

impl PlatformTarget {
    /// Returns the resolved platform, if the id was recognized.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            PlatformTarget::Known(p) => Some(*p),
            PlatformTarget::Unrecognized(_) => None,
        }
    }

    /// Human-facing label: the canonical id, or the raw id for unknown platforms.
    pub fn label(&self) -> String {
        match self {
            PlatformTarget::Known(p) => p.to_string(),
            PlatformTarget::Unrecognized(raw) => raw.clone(),
        }
    }
}

impl From<&str> for PlatformTarget {
    fn from(id: &str) -> Self {
        id.trim()
            .parse::<Platform>()
            .map(PlatformTarget::Known)
            .unwrap_or_else(|_| PlatformTarget::Unrecognized(id.trim().to_string()))
    }
}

impl From<String> for PlatformTarget {
    fn from(id: String) -> Self {
        PlatformTarget::from(id.as_str())
    }
}

impl From<Platform> for PlatformTarget {
    fn from(p: Platform) -> Self {
        PlatformTarget::Known(p)
    }
}

impl From<PlatformTarget> for String {
    fn from(target: PlatformTarget) -> Self {
        target.label()
    }
}

impl std::fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Voice of the generated post.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    Humorous,
    Inspirational,
    Educational,
    Persuasive,
}

/// What the post is trying to achieve.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    #[default]
    Engagement,
    Awareness,
    Conversions,
    Traffic,
    Education,
    Community,
}

/// Kind of text being generated.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    #[default]
    Content,
    VideoScript,
}

/// Queue priority. Only consulted at enqueue time.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

/// Output formatting switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub use_emojis: bool,
    pub use_hashtags: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            use_emojis: true,
            use_hashtags: true,
        }
    }
}

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// A single request for generated content.
///
/// Treated as immutable once handed to the dispatcher, which only ever
/// borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Topic or free-form prompt supplied by the user.
    pub prompt: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub content_type: ContentType,
    /// Ordered target platforms. The first one drives prompt and fallback shaping.
    #[serde(default)]
    pub platforms: Vec<PlatformTarget>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub options: FormatOptions,
    #[serde(default)]
    pub priority: Priority,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            template_id: None,
            content_type: ContentType::Content,
            platforms: Vec::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            tone: Tone::default(),
            goal: Goal::default(),
            key_points: Vec::new(),
            options: FormatOptions::default(),
            priority: Priority::default(),
        }
    }

    pub fn with_platform(mut self, platform: impl Into<PlatformTarget>) -> Self {
        self.platforms.push(platform.into());
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_key_points(mut self, key_points: Vec<String>) -> Self {
        self.key_points = key_points;
        self
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// The platform that shapes prompt and fallback text, if any were given.
    pub fn primary_platform(&self) -> Option<&PlatformTarget> {
        self.platforms.first()
    }
}

/// Token usage figures.
///
/// These are estimates (one token per four characters, rounded up), not
/// tokenizer output. Consumers must not treat them as billing-grade counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn estimate(prompt: &str, completion: &str) -> Self {
        let prompt_tokens = estimate_tokens(prompt);
        let completion_tokens = estimate_tokens(completion);
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_tokens == 0
    }
}

fn estimate_tokens(text: &str) -> u32 {
    let chars = text.chars().count();
    u32::try_from(chars.div_ceil(4)).unwrap_or(u32::MAX)
}

/// Result of one generation request. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub content: String,
    /// Advisory error message; content may still be usable fallback text.
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
    pub usage: TokenUsage,
    pub fallback_used: bool,
    /// Platform the content was shaped for.
    pub platform: Option<PlatformTarget>,
}

impl GenerationResponse {
    /// Remote generation produced usable content.
    pub fn success(
        content: String,
        usage: TokenUsage,
        platform: Option<PlatformTarget>,
        remote_fallback: bool,
    ) -> Self {
        Self {
            content,
            error: None,
            error_kind: None,
            usage,
            fallback_used: remote_fallback,
            platform,
        }
    }

    /// Remote generation failed; `content` is locally templated text.
    pub fn fallback(
        content: String,
        kind: ErrorKind,
        message: impl Into<String>,
        platform: Option<PlatformTarget>,
    ) -> Self {
        Self {
            content,
            error: Some(message.into()),
            error_kind: Some(kind),
            usage: TokenUsage::default(),
            fallback_used: true,
            platform,
        }
    }

    /// The request was refused before any work; there is no content.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            error: Some(message.into()),
            error_kind: Some(ErrorKind::ValidationError),
            usage: TokenUsage::default(),
            fallback_used: false,
            platform: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// What the remote generation function hands back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteReply {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Set by the remote when it substituted its own canned content.
    #[serde(default)]
    pub fallback: Option<bool>,
}

impl RemoteReply {
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Content after trimming, or `None` when missing or whitespace-only.
    pub fn usable_content(&self) -> Option<&str> {
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// A generated post persisted in the content library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredContent {
    pub id: String,
    pub title: String,
    pub body: String,
    pub platform: Option<PlatformTarget>,
    pub content_type: ContentType,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for saving a new library entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContent {
    pub title: String,
    pub body: String,
    pub platform: Option<PlatformTarget>,
    pub content_type: ContentType,
}

/// Partial update to a library entry; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A fire-and-forget message for the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

/// Identifies the role an adapter plays in the pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Generator,
    Store,
    Notifier,
}
