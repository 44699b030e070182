//! Readset Core - Data Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types and the error taxonomy - no caching
//! logic.

pub mod error;
pub mod types;

pub use error::{
    BackendError, CacheError, CacheResult, EntityStoreError, ExecutionError, SerializationError,
};
pub use types::{EntityType, QueryResponse, Timestamp};
