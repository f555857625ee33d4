// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded per-operation duration windows.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use postforge_config::model::MetricsConfig;
use serde::Serialize;

use crate::recording::record_operation_duration;

/// Default samples kept per operation.
pub const DEFAULT_MAX_SAMPLES: usize = 100;

/// Statistics over one operation's current window, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub p95: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricSummary {
    /// Summary of `samples`, or `None` when there are none.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let median_idx = n / 2;
        let p95_idx = ((n as f64 * 0.95).floor() as usize).min(n - 1);
        Some(Self {
            count: n,
            average: sorted.iter().sum::<f64>() / n as f64,
            median: sorted[median_idx],
            p95: sorted[p95_idx],
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

/// Shared store of recent durations, keyed by operation name.
///
/// Clones share the same store. Each operation keeps at most
/// `max_samples` entries; the oldest are evicted first.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    max_samples: usize,
    samples: Arc<Mutex<HashMap<String, VecDeque<f64>>>>,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLES)
    }
}

impl MetricsRegistry {
    pub fn new(max_samples: usize) -> Self {
        Self {
            max_samples: max_samples.max(1),
            samples: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn from_config(config: &MetricsConfig) -> Self {
        Self::new(config.max_samples)
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, VecDeque<f64>>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start timing `operation`. The duration is recorded when the timer is stopped.
    pub fn start_timer(&self, operation: impl Into<String>) -> OperationTimer {
        OperationTimer {
            registry: self.clone(),
            operation: operation.into(),
            started: Instant::now(),
        }
    }

    /// Append one duration to `operation`'s window.
    pub fn record(&self, operation: &str, millis: f64) {
        {
            let mut samples = self.lock();
            let window = samples.entry(operation.to_string()).or_default();
            if window.len() == self.max_samples {
                window.pop_front();
            }
            window.push_back(millis);
        }
        record_operation_duration(operation, millis);
    }

    /// Snapshot of `operation`'s window, oldest first.
    pub fn samples(&self, operation: &str) -> Vec<f64> {
        self.lock()
            .get(operation)
            .map(|w| w.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Statistics for `operation`, recomputed from the current window.
    pub fn summary(&self, operation: &str) -> Option<MetricSummary> {
        MetricSummary::from_samples(&self.samples(operation))
    }

    /// Names of every operation with at least one sample, sorted.
    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// Running timer for one operation.
#[must_use = "a timer records nothing unless stopped"]
#[derive(Debug)]
pub struct OperationTimer {
    registry: MetricsRegistry,
    operation: String,
    started: Instant,
}

impl OperationTimer {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Record the elapsed time and return it in milliseconds.
    pub fn stop(self) -> f64 {
        let millis = self.started.elapsed().as_secs_f64() * 1000.0;
        self.registry.record(&self.operation, millis);
        millis
    }
}
