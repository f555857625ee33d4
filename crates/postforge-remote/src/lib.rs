// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote generation adapter for Postforge.
//!
//! [`HostedFunctionClient`] posts prompts to a hosted serverless function
//! and maps HTTP failures onto the pipeline's error taxonomy. It never
//! retries on its own; retry policy belongs to the dispatcher.

pub mod client;

pub use client::{HostedFunctionClient, kind_for_status};
