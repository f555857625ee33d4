// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Postforge content generation pipeline.
//!
//! This crate provides the error taxonomy, the domain types that flow
//! through prompt building, dispatch and storage, and the adapter traits for
//! the pipeline's external collaborators (remote generator, content store,
//! notification sink).

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, PostforgeError};
pub use types::{
    AdapterType, ContentType, FormatOptions, GenerationRequest, GenerationResponse, Goal,
    HealthStatus, Notification, NotificationLevel, Platform, PlatformTarget, Priority,
    RemoteReply, Tone, TokenUsage,
};

pub use traits::{ContentStore, Notifier, PluginAdapter, RemoteGenerator};
