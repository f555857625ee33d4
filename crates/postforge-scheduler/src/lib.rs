// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local request scheduler.
//!
//! A single shared queue drained in fixed-size batches. At most
//! `concurrency` tasks run at once across every clone of a
//! [`RequestScheduler`]; batches are separated by a fixed delay while work
//! remains.

pub mod handle;
pub mod scheduler;

pub use handle::TaskHandle;
pub use scheduler::{RequestScheduler, SchedulerSettings};
