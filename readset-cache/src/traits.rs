//! Collaborator traits consumed by the cache gateway.
//!
//! The gateway has no network or file surface of its own; the downstream
//! executor, the cache storage, the entity store, and response encoding are
//! all injected through these traits.

use crate::entry::CacheEntry;
use crate::key::CacheKey;
use crate::tracker::ReadTracker;
use async_trait::async_trait;
use readset_core::{CacheResult, EntityType, QueryResponse, SerializationError, Timestamp};
use serde_json::Value as JsonValue;

/// The downstream query executor - the "next" stage the gateway wraps.
///
/// Implementations must report every entity-type read to the supplied
/// [`ReadTracker`]; the resulting access set becomes the cache entry's
/// invalidation contract, so an unreported read causes undetected staleness.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute the query, reporting entity reads to `reads`.
    async fn execute(
        &self,
        query: &str,
        variables: &JsonValue,
        reads: &ReadTracker,
    ) -> CacheResult<QueryResponse>;
}

/// Key-value cache storage.
///
/// Implementations must support values large enough to hold an encoded
/// response plus a small type set and a timestamp. Replacement is atomic at
/// key granularity; entries are never mutated in place.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch the entry stored under `key`, if any.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<CacheEntry>>;

    /// Store `entry` under `key`, replacing any previous entry.
    async fn put(&self, key: &CacheKey, entry: CacheEntry) -> CacheResult<()>;
}

/// Lookup of per-entity-type modification times, used only during
/// staleness validation.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// The most recent modification time of any record of `entity_type`.
    ///
    /// `Ok(None)` means no signal - for example, no live records of that
    /// type. Absence of records is not evidence of staleness.
    async fn last_modified(&self, entity_type: &EntityType) -> CacheResult<Option<Timestamp>>;
}

/// Lossless, deterministic transform between a response and its storable
/// form.
pub trait ResponseCodec: Send + Sync {
    /// Encode a response for storage.
    fn encode(&self, response: &QueryResponse) -> CacheResult<JsonValue>;

    /// Decode a stored response. Must invert `encode` exactly.
    fn decode(&self, stored: &JsonValue) -> CacheResult<QueryResponse>;
}

/// Default codec: the response's own serde representation.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl ResponseCodec for JsonCodec {
    fn encode(&self, response: &QueryResponse) -> CacheResult<JsonValue> {
        serde_json::to_value(response).map_err(|e| {
            SerializationError::Response {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn decode(&self, stored: &JsonValue) -> CacheResult<QueryResponse> {
        serde_json::from_value(stored.clone()).map_err(|e| {
            SerializationError::Response {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
