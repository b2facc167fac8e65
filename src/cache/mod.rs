// Cache module for the local SQLite-backed store.
// Caches DID lookups with a fixed TTL and keeps persistent configuration values.

pub mod bootstrap;
pub mod clock;
pub mod paths;
pub mod schema;
pub mod store;

pub use bootstrap::{open, open_connection, open_default};
pub use clock::{Clock, ManualClock, SystemClock};
pub use schema::{AttachedFile, FileReplica};
pub use store::{ACTIVE_INSTANCE_KEY, CACHE_TTL, CacheStore};
