//! Incremental hashing with an in-memory per-path cache.
//!
//! This module lets repeated tree digests skip rehashing files that have not
//! changed since the previous call on the same engine instance.
//!
//! # Architecture
//!
//! * [`entry`]: The [`CacheRecord`] kept for each path.
//! * [`store`]: [`HashCache`], the three per-attribute maps.
//! * [`incremental`]: [`IncrementalHasher`], the engine owning the cache and
//!   applying the invalidation policy.
//!
//! # Cache Invalidation
//!
//! A file's cached digest is reused only when all of these still match:
//! * Cache key (normalized absolute path)
//! * Algorithm the digest was computed with
//! * Modification time
//! * SHA-1 content fingerprint, recomputed on every call
//!
//! Cache state lives only as long as the engine; nothing is persisted.

pub mod entry;
pub mod incremental;
pub mod store;

pub use entry::CacheRecord;
pub use incremental::{CacheStats, IncrementalHasher};
pub use store::HashCache;
