// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types and the generation error taxonomy.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// The primary error type used across all Postforge crates.
#[derive(Debug, Error)]
pub enum PostforgeError {
    /// Configuration errors (invalid TOML, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A request failed input validation before any remote work was attempted.
    #[error("validation error: {0}")]
    Validation(String),

    /// The remote generation call failed or reported an error.
    #[error("remote generation error ({kind}): {message}")]
    Remote {
        kind: ErrorKind,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Content store errors (I/O, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored content item does not exist.
    #[error("content not found: {id}")]
    NotFound { id: String },

    /// The request scheduler could not run a task to completion.
    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PostforgeError {
    /// Shorthand for a remote error without an underlying source.
    pub fn remote(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Remote {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Maps this error onto the generation taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::Remote { kind, .. } => *kind,
            Self::Timeout { .. } => ErrorKind::GenerationTimeout,
            Self::Config(_)
            | Self::Storage { .. }
            | Self::NotFound { .. }
            | Self::Scheduler(_)
            | Self::Internal(_) => ErrorKind::Unknown,
        }
    }
}

/// Typed taxonomy for generation failures.
///
/// The string forms are stable and are what ends up in
/// [`GenerationResponse::error_kind`](crate::types::GenerationResponse).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationError,
    NetworkError,
    RateLimit,
    ContentModeration,
    ServiceDisruption,
    ApiError,
    GenerationTimeout,
    Unknown,
}

/// Keyword table consulted in order; first match wins.
const CLASSIFICATION_RULES: &[(ErrorKind, &[&str])] = &[
    (
        ErrorKind::RateLimit,
        &["rate limit", "rate_limit", "too many requests", "429", "quota"],
    ),
    (
        ErrorKind::ContentModeration,
        &["moderation", "policy", "safety", "flagged"],
    ),
    (
        ErrorKind::GenerationTimeout,
        &["timeout", "timed out", "deadline"],
    ),
    (
        ErrorKind::ServiceDisruption,
        &["503", "502", "unavailable", "overloaded", "maintenance"],
    ),
    (
        ErrorKind::NetworkError,
        &["network", "connection", "fetch", "dns", "econnreset"],
    ),
    (
        ErrorKind::ValidationError,
        &["invalid", "missing", "required"],
    ),
];

impl ErrorKind {
    /// Classify a free-text error message reported by a remote service.
    ///
    /// Messages that match no rule are reported as [`ErrorKind::ApiError`]:
    /// the remote answered, it just answered with a failure.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        CLASSIFICATION_RULES
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
            .map(|(kind, _)| *kind)
            .unwrap_or(ErrorKind::ApiError)
    }

    /// Whether a failure of this kind is worth another attempt.
    ///
    /// Timeouts are deliberately excluded: a request that already spent its
    /// whole timeout budget goes straight to fallback content.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::NetworkError | ErrorKind::RateLimit | ErrorKind::ServiceDisruption
        )
    }

    /// Short advisory text suitable for a notification surface.
    pub fn advisory(self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "Please provide a topic and at least one platform.",
            ErrorKind::NetworkError => "Network problem reaching the generation service.",
            ErrorKind::RateLimit => "Generation rate limit reached, try again shortly.",
            ErrorKind::ContentModeration => "The request was blocked by content moderation.",
            ErrorKind::ServiceDisruption => "The generation service is temporarily unavailable.",
            ErrorKind::ApiError => "The generation service returned an error.",
            ErrorKind::GenerationTimeout => "Generation took too long and was abandoned.",
            ErrorKind::Unknown => "Something went wrong while generating content.",
        }
    }
}
