// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Performance metrics for the Postforge generation pipeline.
//!
//! [`MetricsRegistry`] keeps a bounded window of recent durations per
//! operation and computes summary statistics on demand. Every recorded
//! duration is also forwarded to the metrics-rs facade, so an installed
//! recorder (see [`exporter`]) sees the same numbers.

pub mod exporter;
pub mod recording;
pub mod registry;

pub use exporter::PrometheusExporter;
pub use recording::{record_fallback, record_generation, record_operation_duration, register_metrics};
pub use registry::{MetricSummary, MetricsRegistry, OperationTimer};
