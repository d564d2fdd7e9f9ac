//! In-memory per-path cache state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::entry::CacheRecord;
use crate::scanner::{Digest, HashAlgorithm};

/// Per-path cache held by one [`IncrementalHasher`](super::IncrementalHasher).
///
/// Stored as three maps keyed by normalized absolute path: digests (with the
/// algorithm they were computed under), modification times and fingerprints.
/// A path has a usable record only when all three are present.
#[derive(Debug, Default, Clone)]
pub struct HashCache {
    digests: HashMap<PathBuf, (HashAlgorithm, Digest)>,
    modified: HashMap<PathBuf, SystemTime>,
    fingerprints: HashMap<PathBuf, Digest>,
}

impl HashCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached digest for `key` if the stored record is fresh.
    ///
    /// Freshness is decided by [`CacheRecord::is_fresh`].
    #[must_use]
    pub fn lookup(
        &self,
        key: &Path,
        algorithm: HashAlgorithm,
        modified: SystemTime,
        fingerprint: &Digest,
    ) -> Option<Digest> {
        let record = self.get(key)?;
        record
            .is_fresh(algorithm, modified, fingerprint)
            .then_some(record.digest)
    }

    /// Assemble the full record for `key`.
    #[must_use]
    pub fn get(&self, key: &Path) -> Option<CacheRecord> {
        let (algorithm, digest) = self.digests.get(key)?;
        Some(CacheRecord {
            digest: digest.clone(),
            algorithm: *algorithm,
            modified: *self.modified.get(key)?,
            fingerprint: self.fingerprints.get(key)?.clone(),
        })
    }

    /// Insert or refresh the record for `key`.
    pub fn insert(&mut self, key: PathBuf, record: CacheRecord) {
        self.modified.insert(key.clone(), record.modified);
        self.fingerprints.insert(key.clone(), record.fingerprint);
        self.digests.insert(key, (record.algorithm, record.digest));
    }

    /// Drop only the digest for `key`, so it cannot be returned until the
    /// path has been recomputed.
    pub fn invalidate_digest(&mut self, key: &Path) {
        self.digests.remove(key);
    }

    /// Empty all three maps.
    pub fn clear(&mut self) {
        self.digests.clear();
        self.modified.clear();
        self.fingerprints.clear();
    }

    /// Number of paths with a cached digest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// Whether no digests are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}
