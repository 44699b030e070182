//! In-memory reference implementations of the collaborator traits.
//!
//! Suitable for single-process deployments and as test doubles. Both types
//! use tokio's RwLock for safe async access.

use crate::entry::CacheEntry;
use crate::key::CacheKey;
use crate::traits::{CacheBackend, EntityStore};
use async_trait::async_trait;
use chrono::Utc;
use readset_core::{CacheResult, EntityType, Timestamp};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory cache backend.
///
/// Unbounded; eviction is not this layer's concern.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the backend holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl CacheBackend for InMemoryBackend {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<CacheEntry>> {
        Ok(self.entries.read().await.get(key.as_str()).cloned())
    }

    async fn put(&self, key: &CacheKey, entry: CacheEntry) -> CacheResult<()> {
        self.entries
            .write()
            .await
            .insert(key.as_str().to_string(), entry);
        Ok(())
    }
}

/// In-memory entity store tracking last-modified timestamps per type.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    timestamps: RwLock<HashMap<EntityType, Timestamp>>,
}

impl InMemoryEntityStore {
    /// Create a store with no recorded modifications.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a modification of `entity_type` at the current time.
    pub async fn touch(&self, entity_type: impl Into<EntityType>) {
        self.set_last_modified(entity_type, Utc::now()).await;
    }

    /// Record a modification of `entity_type` at an explicit time.
    pub async fn set_last_modified(
        &self,
        entity_type: impl Into<EntityType>,
        at: Timestamp,
    ) {
        self.timestamps
            .write()
            .await
            .insert(entity_type.into(), at);
    }

    /// Forget all records of `entity_type`, so lookups return no signal.
    pub async fn remove(&self, entity_type: &EntityType) {
        self.timestamps.write().await.remove(entity_type);
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn last_modified(&self, entity_type: &EntityType) -> CacheResult<Option<Timestamp>> {
        Ok(self.timestamps.read().await.get(entity_type).copied())
    }
}
