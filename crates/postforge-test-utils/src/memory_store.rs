// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `ContentStore`.

use async_trait::async_trait;
use chrono::Utc;
use postforge_core::types::{ContentUpdate, NewContent, StoredContent};
use postforge_core::{AdapterType, ContentStore, HealthStatus, PluginAdapter, PostforgeError};
use tokio::sync::Mutex;

/// Keeps entries in insertion order; nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<StoredContent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, PostforgeError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn save_content(&self, content: NewContent) -> Result<StoredContent, PostforgeError> {
        let now = Utc::now();
        let entry = StoredContent {
            id: uuid::Uuid::new_v4().to_string(),
            title: content.title,
            body: content.body,
            platform: content.platform,
            content_type: content.content_type,
            hashtags: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.items.lock().await.push(entry.clone());
        Ok(entry)
    }

    async fn update_content(
        &self,
        id: &str,
        update: ContentUpdate,
    ) -> Result<StoredContent, PostforgeError> {
        let mut items = self.items.lock().await;
        let entry = items
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PostforgeError::NotFound { id: id.to_string() })?;
        if let Some(title) = update.title {
            entry.title = title;
        }
        if let Some(body) = update.body {
            entry.body = body;
        }
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn delete_content(&self, id: &str) -> Result<(), PostforgeError> {
        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|c| c.id != id);
        if items.len() == before {
            return Err(PostforgeError::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    async fn get_content(&self, id: &str) -> Result<Option<StoredContent>, PostforgeError> {
        Ok(self.items.lock().await.iter().find(|c| c.id == id).cloned())
    }

    async fn list_content(&self) -> Result<Vec<StoredContent>, PostforgeError> {
        Ok(self.items.lock().await.iter().rev().cloned().collect())
    }
}
