//! Cache gateway: derive key, validated fetch, recorded execution, store.
//!
//! The gateway holds its collaborators by explicit injection and performs
//! no retries. Correctness-affecting errors (key serialization, executor
//! failure) propagate to the caller; cache-layer failures (backend or
//! entity-store unavailability) degrade to a recompute with a warning
//! rather than failing the caller's request.

use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::key::CacheKey;
use crate::tracker::ReadTracker;
use crate::traits::{CacheBackend, EntityStore, JsonCodec, QueryExecutor, ResponseCodec};
use readset_core::{CacheResult, QueryResponse};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Orchestrates result caching around a downstream query executor.
///
/// Per call: derive the cache key, attempt a staleness-validated fetch, and
/// on a miss run the executor under a fresh [`ReadTracker`], storing the
/// response together with its access set and a creation timestamp.
///
/// Concurrency: no mutual exclusion is provided across calls. Two
/// concurrent misses on the same key may both execute and both store;
/// entries are immutable and replacement is atomic at key granularity, so
/// last-write-wins without corruption.
pub struct CacheGateway<B, S>
where
    B: CacheBackend,
    S: EntityStore,
{
    /// Key-value storage for entries.
    backend: Arc<B>,
    /// Last-modified lookups for staleness validation.
    entities: Arc<S>,
    /// Response encoding for storage.
    codec: Arc<dyn ResponseCodec>,
    /// Gateway configuration.
    config: CacheConfig,
}

impl<B, S> CacheGateway<B, S>
where
    B: CacheBackend,
    S: EntityStore,
{
    /// Create a gateway with explicit collaborators.
    pub fn new(
        backend: Arc<B>,
        entities: Arc<S>,
        codec: Arc<dyn ResponseCodec>,
        config: CacheConfig,
    ) -> Self {
        Self {
            backend,
            entities,
            codec,
            config,
        }
    }

    /// Create a gateway with the JSON codec and default configuration.
    pub fn with_defaults(backend: Arc<B>, entities: Arc<S>) -> Self {
        Self::new(
            backend,
            entities,
            Arc::new(JsonCodec),
            CacheConfig::default(),
        )
    }

    /// Get the gateway configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get a reference to the cache backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a reference to the entity store.
    pub fn entities(&self) -> &S {
        &self.entities
    }

    /// Process one query through the cache.
    ///
    /// On a validated hit the stored response is decoded and returned
    /// without invoking the executor. On a miss the executor runs under a
    /// fresh [`ReadTracker`]; its response is stored with the recorded
    /// access set and returned in its original form. Nothing is stored for
    /// a failed execution.
    pub async fn process<X>(
        &self,
        query: &str,
        variables: &JsonValue,
        executor: &X,
    ) -> CacheResult<QueryResponse>
    where
        X: QueryExecutor,
    {
        if !self.config.enabled {
            let tracker = ReadTracker::new();
            return executor.execute(query, variables, &tracker).await;
        }

        let key = CacheKey::derive(self.config.namespace.as_deref(), query, variables)?;

        if let Some(entry) = self.fetch(&key).await {
            if self.is_current(&entry).await {
                match self.codec.decode(entry.response()) {
                    Ok(response) => {
                        tracing::debug!(key = %key, "cache hit");
                        return Ok(response);
                    }
                    Err(err) => {
                        // Corrupt stored response; recompute instead of
                        // failing the call.
                        tracing::warn!(key = %key, error = %err, "stored response failed to decode");
                    }
                }
            }
        }

        let tracker = ReadTracker::new();
        let (reads, result) = tracker
            .record(executor.execute(query, variables, &tracker))
            .await;
        let response = result?;

        let stored = self.codec.encode(&response)?;
        let entry = CacheEntry::new(reads, stored);
        if let Err(err) = self.backend.put(&key, entry).await {
            // Losing a cache write is recoverable; losing the computed
            // result is not. Surface through the log only.
            tracing::warn!(key = %key, error = %err, "cache store failed");
        }

        Ok(response)
    }

    /// Fetch an entry, degrading a backend failure to an observable miss.
    async fn fetch(&self, key: &CacheKey) -> Option<CacheEntry> {
        match self.backend.get(key).await {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "cache fetch failed, treating as miss");
                None
            }
        }
    }

    /// Validate an entry against the last-modified times of its access set.
    ///
    /// An entity type with no signal (no live records) does not invalidate
    /// the entry; a failed lookup does, since the entry can no longer be
    /// validated.
    async fn is_current(&self, entry: &CacheEntry) -> bool {
        for entity_type in entry.accessed_types() {
            match self.entities.last_modified(entity_type).await {
                Ok(Some(modified)) if modified > entry.created_at() => {
                    tracing::debug!(entity_type = %entity_type, "cache entry stale");
                    return false;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        entity_type = %entity_type,
                        error = %err,
                        "last-modified lookup failed, recomputing"
                    );
                    return false;
                }
            }
        }
        true
    }
}

impl<B, S> Clone for CacheGateway<B, S>
where
    B: CacheBackend,
    S: EntityStore,
{
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            entities: Arc::clone(&self.entities),
            codec: Arc::clone(&self.codec),
            config: self.config.clone(),
        }
    }
}
