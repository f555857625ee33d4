// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform capability table and prompt construction.
//!
//! - [`platform`]: static per-platform limits and style notes
//! - [`builder`]: deterministic post prompts
//! - [`video`]: timed video-script prompts with pluggable variant picking

pub mod builder;
pub mod platform;
pub mod video;

pub use builder::{PromptBuilder, PromptInput, build_post_prompt};
pub use platform::{PlatformConfig, capabilities, config_for};
pub use video::{FixedPicker, RandomPicker, SeededPicker, VariantPicker};
