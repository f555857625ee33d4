// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the pipeline's external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` so they can be held as `Arc<dyn ...>`.

pub mod adapter;
pub mod generator;
pub mod notifier;
pub mod store;

pub use adapter::PluginAdapter;
pub use generator::RemoteGenerator;
pub use notifier::Notifier;
pub use store::ContentStore;
