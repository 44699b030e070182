//! Persisted cache entry.

use chrono::Utc;
use readset_core::{EntityType, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;

/// The value stored under a cache key.
///
/// An entry is immutable once constructed; it is only ever superseded by a
/// later store under the same key or removed by the backend's own policy.
///
/// Invariant: `accessed_types` is exactly the set of distinct entity types
/// read while producing `response`. A missing type causes undetected
/// staleness; an extra type causes unnecessary recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Entity types read during the original execution. Kept as a
    /// `BTreeSet` so the stored form is order-stable.
    accessed_types: BTreeSet<EntityType>,
    /// The encoded execution response, opaque to the entry.
    response: JsonValue,
    /// When this entry was stored.
    created_at: Timestamp,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(accessed_types: BTreeSet<EntityType>, response: JsonValue) -> Self {
        Self {
            accessed_types,
            response,
            created_at: Utc::now(),
        }
    }

    /// Create an entry with an explicit creation timestamp.
    pub fn with_created_at(
        accessed_types: BTreeSet<EntityType>,
        response: JsonValue,
        created_at: Timestamp,
    ) -> Self {
        Self {
            accessed_types,
            response,
            created_at,
        }
    }

    /// The entity types this entry depends on.
    pub fn accessed_types(&self) -> &BTreeSet<EntityType> {
        &self.accessed_types
    }

    /// The encoded response.
    pub fn response(&self) -> &JsonValue {
        &self.response
    }

    /// When this entry was stored.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Whether this entry depends on the given entity type.
    pub fn depends_on(&self, entity_type: &EntityType) -> bool {
        self.accessed_types.contains(entity_type)
    }
}
