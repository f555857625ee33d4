// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilience primitives for the Postforge generation pipeline.
//!
//! One retry/backoff policy shared by every caller:
//! `delay = min(base * 2^attempt, max)`, retrying only error kinds the
//! taxonomy marks as transient.

pub mod retry;

pub use retry::RetryPolicy;
