// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation request dispatcher.
//!
//! Orchestrates one request end to end: validate, build the prompt, run
//! the remote call through the shared scheduler under a timeout, retry
//! transient failures, and substitute fallback text when nothing usable
//! comes back. Callers always get renderable content or an empty-prompt
//! rejection; errors travel as metadata on the response.

pub mod dispatcher;
pub mod settings;

pub use dispatcher::{GENERATE_CONTENT, GenerationDispatcher};
pub use settings::DispatchSettings;
