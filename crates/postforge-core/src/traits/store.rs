// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent content store for generated posts.

use async_trait::async_trait;

use crate::error::PostforgeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ContentUpdate, NewContent, StoredContent};

/// Storage collaborator for the content library.
///
/// The generation pipeline never calls this itself; it produces text and
/// metadata that callers choose to persist.
#[async_trait]
pub trait ContentStore: PluginAdapter {
    async fn save_content(&self, content: NewContent) -> Result<StoredContent, PostforgeError>;

    async fn update_content(
        &self,
        id: &str,
        update: ContentUpdate,
    ) -> Result<StoredContent, PostforgeError>;

    async fn delete_content(&self, id: &str) -> Result<(), PostforgeError>;

    async fn get_content(&self, id: &str) -> Result<Option<StoredContent>, PostforgeError>;

    /// All entries, newest first.
    async fn list_content(&self) -> Result<Vec<StoredContent>, PostforgeError>;
}
