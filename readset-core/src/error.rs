//! Error types for readset operations

use crate::EntityType;
use thiserror::Error;

/// Serialization errors.
///
/// Raised when a value cannot be represented in the canonical deterministic
/// form the cache depends on. These are correctness-affecting and always
/// propagate to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SerializationError {
    #[error("Cannot derive cache key: {reason}")]
    KeyInput { reason: String },

    #[error("Cannot encode response for storage: {reason}")]
    Response { reason: String },
}

/// Errors raised by the downstream query executor.
///
/// Propagated unchanged through the gateway; no cache entry is stored for a
/// failed execution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Query execution failed: {message}")]
    Failed { message: String },

    #[error("Query rejected before execution: {reason}")]
    Rejected { reason: String },
}

/// Cache backend errors.
///
/// These are cache-layer-only failures: a fetch failure degrades to a
/// recompute and a store failure never fails a call that already holds a
/// correct result. They still exist as errors so backend implementations
/// can surface connectivity problems instead of masking them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("Cache fetch failed for key {key}: {reason}")]
    Fetch { key: String, reason: String },

    #[error("Cache store failed for key {key}: {reason}")]
    Store { key: String, reason: String },
}

/// Entity store errors, raised while looking up last-modified timestamps
/// during staleness validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityStoreError {
    #[error("Last-modified lookup failed for {entity_type}: {reason}")]
    Lookup {
        entity_type: EntityType,
        reason: String,
    },
}

/// Master error type for all readset operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Entity store error: {0}")]
    EntityStore(#[from] EntityStoreError),
}

/// Result type alias for readset operations.
pub type CacheResult<T> = Result<T, CacheError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error_display() {
        let err = SerializationError::KeyInput {
            reason: "recursion limit".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Cannot derive cache key"));
        assert!(msg.contains("recursion limit"));
    }

    #[test]
    fn test_execution_error_display() {
        let err = ExecutionError::Failed {
            message: "unknown field".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Query execution failed"));
        assert!(msg.contains("unknown field"));
    }

    #[test]
    fn test_backend_error_display_fetch() {
        let err = BackendError::Fetch {
            key: "abc123".to_string(),
            reason: "connection refused".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Cache fetch failed"));
        assert!(msg.contains("abc123"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_entity_store_error_display() {
        let err = EntityStoreError::Lookup {
            entity_type: EntityType::from("Book"),
            reason: "timeout".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Book"));
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn test_cache_error_from_variants() {
        let serialization = CacheError::from(SerializationError::Response {
            reason: "nan".to_string(),
        });
        assert!(matches!(serialization, CacheError::Serialization(_)));

        let execution = CacheError::from(ExecutionError::Rejected {
            reason: "depth limit".to_string(),
        });
        assert!(matches!(execution, CacheError::Execution(_)));

        let backend = CacheError::from(BackendError::Store {
            key: "k".to_string(),
            reason: "full".to_string(),
        });
        assert!(matches!(backend, CacheError::Backend(_)));

        let store = CacheError::from(EntityStoreError::Lookup {
            entity_type: EntityType::from("Book"),
            reason: "down".to_string(),
        });
        assert!(matches!(store, CacheError::EntityStore(_)));
    }
}
