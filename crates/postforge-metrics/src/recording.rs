// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade; without an installed recorder these calls
//! are no-ops.

use metrics::{describe_counter, describe_histogram};
use postforge_core::ErrorKind;

pub const GENERATIONS_TOTAL: &str = "postforge_generations_total";
pub const FALLBACKS_TOTAL: &str = "postforge_fallbacks_total";
pub const OPERATION_DURATION_MS: &str = "postforge_operation_duration_ms";

/// Register all Postforge metric descriptions.
///
/// Called once after a recorder is installed.
pub fn register_metrics() {
    describe_counter!(GENERATIONS_TOTAL, "Generation requests by platform and outcome");
    describe_counter!(FALLBACKS_TOTAL, "Responses served from fallback templates, by error kind");
    describe_histogram!(
        OPERATION_DURATION_MS,
        metrics::Unit::Milliseconds,
        "Duration of timed pipeline operations"
    );
}

/// Count one finished generation request.
///
/// `outcome` is `success`, `fallback` or `rejected`.
pub fn record_generation(platform: &str, outcome: &'static str) {
    metrics::counter!(GENERATIONS_TOTAL, "platform" => platform.to_string(), "outcome" => outcome)
        .increment(1);
}

/// Count a fallback substitution.
pub fn record_fallback(kind: ErrorKind) {
    metrics::counter!(FALLBACKS_TOTAL, "kind" => kind.to_string()).increment(1);
}

/// Record a duration for a timed operation.
pub fn record_operation_duration(operation: &str, millis: f64) {
    metrics::histogram!(OPERATION_DURATION_MS, "operation" => operation.to_string()).record(millis);
}
