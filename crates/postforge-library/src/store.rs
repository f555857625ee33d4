// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ContentStore`] backed by one JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use postforge_core::{
    AdapterType, ContentStore, HealthStatus, PluginAdapter, PostforgeError,
    types::{ContentUpdate, NewContent, StoredContent},
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::hashtags::extract_hashtags;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct LibraryFile {
    version: u32,
    items: Vec<StoredContent>,
}

fn storage_error(e: impl std::error::Error + Send + Sync + 'static) -> PostforgeError {
    PostforgeError::Storage {
        source: Box::new(e),
    }
}

/// Content library persisted as a JSON document.
///
/// Entries are held in memory behind a lock; every mutation rewrites the
/// file before the in-memory copy changes, so a failed write leaves both
/// untouched.
#[derive(Debug)]
pub struct JsonLibrary {
    path: PathBuf,
    items: RwLock<Vec<StoredContent>>,
}

impl JsonLibrary {
    /// Open the library at `path`. A missing file is an empty library.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PostforgeError> {
        let path = path.into();
        let items = match tokio::fs::read_to_string(&path).await {
            Ok(text) if text.trim().is_empty() => Vec::new(),
            Ok(text) => {
                let file: LibraryFile = serde_json::from_str(&text).map_err(storage_error)?;
                file.items
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(storage_error(e)),
        };
        debug!(path = %path.display(), entries = items.len(), "content library opened");
        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    async fn persist(&self, items: &[StoredContent]) -> Result<(), PostforgeError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(storage_error)?;
        }
        let file = LibraryFile {
            version: FORMAT_VERSION,
            items: items.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(storage_error)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, json).await.map_err(storage_error)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(storage_error)?;
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for JsonLibrary {
    fn name(&self) -> &str {
        "json-library"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, PostforgeError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => Ok(HealthStatus::Degraded(
                format!("library directory {} does not exist yet", dir.display()),
            )),
            _ => Ok(HealthStatus::Healthy),
        }
    }
}

#[async_trait]
impl ContentStore for JsonLibrary {
    async fn save_content(&self, content: NewContent) -> Result<StoredContent, PostforgeError> {
        let now = Utc::now();
        let entry = StoredContent {
            id: uuid::Uuid::new_v4().to_string(),
            hashtags: extract_hashtags(&content.body),
            title: content.title,
            body: content.body,
            platform: content.platform,
            content_type: content.content_type,
            created_at: now,
            updated_at: now,
        };

        let mut items = self.items.write().await;
        let mut next = items.clone();
        next.push(entry.clone());
        self.persist(&next).await?;
        *items = next;

        info!(id = %entry.id, "saved content to library");
        Ok(entry)
    }

    async fn update_content(
        &self,
        id: &str,
        update: ContentUpdate,
    ) -> Result<StoredContent, PostforgeError> {
        let mut items = self.items.write().await;
        let mut next = items.clone();
        let entry = next
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PostforgeError::NotFound { id: id.to_string() })?;

        if let Some(title) = update.title {
            entry.title = title;
        }
        if let Some(body) = update.body {
            entry.hashtags = extract_hashtags(&body);
            entry.body = body;
        }
        entry.updated_at = Utc::now();
        let updated = entry.clone();

        self.persist(&next).await?;
        *items = next;
        debug!(id, "updated library entry");
        Ok(updated)
    }

    async fn delete_content(&self, id: &str) -> Result<(), PostforgeError> {
        let mut items = self.items.write().await;
        let next: Vec<StoredContent> = items.iter().filter(|c| c.id != id).cloned().collect();
        if next.len() == items.len() {
            return Err(PostforgeError::NotFound { id: id.to_string() });
        }
        self.persist(&next).await?;
        *items = next;
        info!(id, "deleted library entry");
        Ok(())
    }

    async fn get_content(&self, id: &str) -> Result<Option<StoredContent>, PostforgeError> {
        Ok(self.items.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn list_content(&self) -> Result<Vec<StoredContent>, PostforgeError> {
        let mut items: Vec<StoredContent> = self.items.read().await.iter().rev().cloned().collect();
        // Stable sort keeps later inserts first among equal timestamps.
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}
