// Local TTL cache and configuration store.
// Persists DID metadata and replica lookups so callers can skip repeated remote queries.

pub mod cache;
pub mod error;

pub use cache::{
    AttachedFile, CACHE_TTL, CacheStore, Clock, FileReplica, ManualClock, SystemClock,
};
pub use error::{CacheError, Result};
