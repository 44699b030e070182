//! Readset Cache - Access-Tracked Result Caching
//!
//! This crate implements a result cache for a query-execution layer where
//! entries are invalidated by data changes rather than by a fixed TTL. Each
//! cached response remembers the set of entity types read while it was
//! computed; on a hit, their last-modified timestamps are compared against
//! the entry's creation time before the stored response is served.
//!
//! # Design Philosophy
//!
//! Traditional caches hide their staleness behind a TTL guess. This crate
//! makes the dependency set explicit: the executor reports every entity-type
//! read to a [`ReadTracker`] threaded through the call, and the resulting
//! access set becomes the entry's invalidation contract.
//!
//! # Components
//!
//! - [`CacheKey`] - deterministic fingerprint of (namespace, query, variables)
//! - [`ReadTracker`] - execution-scoped recording of entity-type reads
//! - [`CacheGateway`] - orchestrates derive -> validated fetch -> recorded
//!   execute -> store
//!
//! # Example
//!
//! ```ignore
//! let gateway = CacheGateway::with_defaults(backend, entities);
//!
//! // First call misses, executes, and stores the response together with
//! // the set of entity types the executor reported reading.
//! let response = gateway.process(query, &variables, &executor).await?;
//!
//! // Later calls are served from cache until one of those entity types
//! // is modified past the entry's creation time.
//! let response = gateway.process(query, &variables, &executor).await?;
//! ```

pub mod config;
pub mod entry;
pub mod gateway;
pub mod key;
pub mod memory;
pub mod tracker;
pub mod traits;

pub use config::CacheConfig;
pub use entry::CacheEntry;
pub use gateway::CacheGateway;
pub use key::CacheKey;
pub use memory::{InMemoryBackend, InMemoryEntityStore};
pub use tracker::ReadTracker;
pub use traits::{CacheBackend, EntityStore, JsonCodec, QueryExecutor, ResponseCodec};
