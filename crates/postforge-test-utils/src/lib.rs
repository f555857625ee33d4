// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Postforge integration tests.
//!
//! Mock collaborators and a harness that wires a complete dispatcher
//! without network access.
//!
//! # Components
//!
//! - [`MockGenerator`] - scripted remote generator with call recording
//! - [`RecordingNotifier`] - captures notifications for assertions
//! - [`MemoryStore`] - in-memory content store
//! - [`DispatchHarness`] - dispatcher plus its mocks

pub mod harness;
pub mod memory_store;
pub mod mock_generator;
pub mod recording_notifier;

pub use harness::{DispatchHarness, DispatchHarnessBuilder};
pub use memory_store::MemoryStore;
pub use mock_generator::{MockGenerator, MockReply};
pub use recording_notifier::RecordingNotifier;
