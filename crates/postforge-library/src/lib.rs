// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content library for generated posts.
//!
//! A single JSON file holds every entry. Writes go to a temporary sibling
//! and are renamed into place, so a crash never leaves a half-written
//! library behind.

pub mod hashtags;
pub mod store;

pub use hashtags::extract_hashtags;
pub use store::JsonLibrary;
