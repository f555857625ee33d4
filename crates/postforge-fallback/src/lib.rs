// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic fallback posts.
//!
//! Used when remote generation fails or comes back empty. Pure string
//! formatting: no I/O, no randomness, no failure modes. Every input yields
//! non-empty text.

pub mod templates;

pub use templates::{EMOJI_SET, FALLBACK_TOPIC, generate_fallback, topic_hashtags};
