//! Incremental tree digests backed by a per-instance cache.
//!
//! # Decision rule
//!
//! For every included file the engine reads the current modification time and
//! always computes the SHA-1 fingerprint. The cached digest is reused only when
//! a record exists and its algorithm, modification time and fingerprint all
//! match. Otherwise the file is digested with the caller's algorithm and the
//! record is refreshed.
//!
//! Modification times alone are not trusted: a coarse clock can leave a
//! changed file with an unchanged time, and a touch changes the time without
//! changing content. The fingerprint settles both cases. It costs one read of
//! every included file per call; the saving is the caller's algorithm.
//!
//! Directories are always descended, since a directory's own modification time
//! does not move when a nested file's content changes. The directory's digest
//! is dropped from the cache before its children are re-evaluated and written
//! back once the new digest is composed.
//!
//! # Concurrency
//!
//! Traversal is sequential and depth-first. [`IncrementalHasher::digest_tree`]
//! takes `&mut self`, so one instance serves one traversal at a time; share an
//! instance across threads behind a `Mutex`, or give each thread its own.

use std::fs;
use std::path::Path;
use std::time::{Instant, SystemTime};

use super::entry::CacheRecord;
use super::store::HashCache;
use crate::error::HashResult;
use crate::scanner::path_utils::cache_key;
use crate::scanner::{
    digest_file, Digest, Entry, EntryKind, HashAlgorithm, TraversalOptions, Walker,
    FINGERPRINT_ALGORITHM,
};
use crate::tree::compose;

/// Counters for the most recent [`IncrementalHasher::digest_tree`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Files whose cached digest was reused
    pub hits: usize,
    /// Files digested with the caller's algorithm
    pub misses: usize,
    /// Fingerprints computed (one per included file)
    pub fingerprints: usize,
    /// Directories descended, root included
    pub directories: usize,
    /// Entries left out by filters, stat failures or the extension allow-list
    pub skipped: usize,
}

impl CacheStats {
    /// Share of included files served from the cache, in percent.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Digest and fingerprint of one node.
struct Node {
    digest: Digest,
    fingerprint: Digest,
}

/// Tree hasher that reuses digests of files verified unchanged.
///
/// # Example
///
/// ```no_run
/// use dirhash::cache::IncrementalHasher;
/// use dirhash::scanner::TraversalOptions;
/// use std::path::Path;
///
/// let mut hasher = IncrementalHasher::new();
/// let options = TraversalOptions::default();
///
/// let first = hasher.digest_tree(Path::new("src"), &options).unwrap();
/// let second = hasher.digest_tree(Path::new("src"), &options).unwrap();
/// assert_eq!(first, second);
/// println!("{} cached paths, {:.0}% hits", hasher.cache_size(), hasher.last_stats().hit_rate());
/// ```
#[derive(Debug, Default)]
pub struct IncrementalHasher {
    cache: HashCache,
    stats: CacheStats,
}

impl IncrementalHasher {
    /// Create an engine with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the digest of the tree rooted at `root`, reusing verified
    /// file digests from earlier calls.
    ///
    /// Produces the same digest as [`crate::tree::digest_tree`] for the same
    /// tree and options.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::ReadDir`](crate::error::HashError::ReadDir) if any
    /// directory cannot be listed, [`HashError::Io`](crate::error::HashError::Io)
    /// if an included file cannot be read and
    /// [`HashError::InvalidPath`](crate::error::HashError::InvalidPath) if a
    /// cache key cannot be built. Records refreshed before the failure are kept.
    pub fn digest_tree(&mut self, root: &Path, options: &TraversalOptions) -> HashResult<Digest> {
        let started = Instant::now();
        let walker = Walker::new(options);
        self.stats = CacheStats::default();

        let modified = fs::metadata(root)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let node = self.digest_dir(root, modified, walker)?;

        log::debug!(
            "Incremental digest for {} ({}) in {:?}: {} hits, {} misses, {} cached paths",
            root.display(),
            options.algorithm,
            started.elapsed(),
            self.stats.hits,
            self.stats.misses,
            self.cache.len()
        );
        Ok(node.digest)
    }

    /// Empty the cache. The next call recomputes everything.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        log::debug!("Incremental cache cleared");
    }

    /// Number of cached paths, files and directories together.
    #[must_use]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Counters from the most recent call.
    #[must_use]
    pub fn last_stats(&self) -> CacheStats {
        self.stats
    }

    /// The cached record for `path`, if any.
    #[must_use]
    pub fn record(&self, path: &Path) -> Option<CacheRecord> {
        let key = cache_key(path).ok()?;
        self.cache.get(&key)
    }

    fn digest_dir(
        &mut self,
        dir: &Path,
        modified: SystemTime,
        walker: Walker<'_>,
    ) -> HashResult<Node> {
        let listed = walker.list(dir)?;
        let key = cache_key(dir)?;
        self.cache.invalidate_digest(&key);
        self.stats.directories += 1;

        let mut digests = Vec::with_capacity(listed.len());
        let mut fingerprints = Vec::with_capacity(listed.len());

        for listed in listed {
            let Some(entry) = walker.classify(listed) else {
                self.stats.skipped += 1;
                continue;
            };

            let node = match entry.kind {
                EntryKind::Directory => self.digest_dir(&entry.path, entry.modified, walker)?,
                EntryKind::File if walker.accepts_file(&entry.path) => {
                    self.digest_cached_file(&entry, walker.options().algorithm)?
                }
                EntryKind::File => {
                    self.stats.skipped += 1;
                    continue;
                }
            };

            digests.push((entry.name.clone(), node.digest));
            fingerprints.push((entry.name, node.fingerprint));
        }

        let algorithm = walker.options().algorithm;
        let node = Node {
            digest: compose(digests, algorithm),
            fingerprint: compose(fingerprints, FINGERPRINT_ALGORITHM),
        };
        self.cache.insert(
            key,
            CacheRecord {
                digest: node.digest.clone(),
                algorithm,
                modified,
                fingerprint: node.fingerprint.clone(),
            },
        );
        Ok(node)
    }

    fn digest_cached_file(&mut self, entry: &Entry, algorithm: HashAlgorithm) -> HashResult<Node> {
        let key = cache_key(&entry.path)?;
        let fingerprint = digest_file(&entry.path, FINGERPRINT_ALGORITHM)?;
        self.stats.fingerprints += 1;

        if let Some(digest) = self
            .cache
            .lookup(&key, algorithm, entry.modified, &fingerprint)
        {
            log::trace!("Cache hit: {}", entry.path.display());
            self.stats.hits += 1;
            return Ok(Node {
                digest,
                fingerprint,
            });
        }

        log::trace!("Cache miss: {}", entry.path.display());
        self.stats.misses += 1;

        let digest = if algorithm == FINGERPRINT_ALGORITHM {
            fingerprint.clone()
        } else {
            digest_file(&entry.path, algorithm)?
        };

        self.cache.insert(
            key,
            CacheRecord {
                digest: digest.clone(),
                algorithm,
                modified: entry.modified,
                fingerprint: fingerprint.clone(),
            },
        );
        Ok(Node {
            digest,
            fingerprint,
        })
    }
}
