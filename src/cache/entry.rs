//! Cache record definitions.

use std::time::SystemTime;

use crate::scanner::{Digest, HashAlgorithm};

/// Everything the incremental engine remembers about one path.
///
/// `digest` is the caller-selected digest and is what a hit returns.
/// `fingerprint` is always computed with
/// [`FINGERPRINT_ALGORITHM`](crate::scanner::FINGERPRINT_ALGORITHM) and only
/// confirms that content is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    /// Last computed digest
    pub digest: Digest,
    /// Algorithm `digest` was computed with
    pub algorithm: HashAlgorithm,
    /// Modification time observed when `digest` was computed
    pub modified: SystemTime,
    /// Fingerprint observed when `digest` was computed
    pub fingerprint: Digest,
}

impl CacheRecord {
    /// Whether this record still describes an entry with the given state.
    ///
    /// All three must agree: algorithm, modification time and fingerprint.
    #[must_use]
    pub fn is_fresh(
        &self,
        algorithm: HashAlgorithm,
        modified: SystemTime,
        fingerprint: &Digest,
    ) -> bool {
        self.algorithm == algorithm && self.modified == modified && self.fingerprint == *fingerprint
    }
}
