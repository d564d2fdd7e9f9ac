//! Tree digest composition.
//!
//! A directory's digest is built from its included children only: the
//! `(name, digest)` pairs are sorted by the raw bytes of the name and
//! `name:digest` for each pair is fed, in that order, into a fresh hash
//! context of the configured algorithm. Names are never lossily converted, so
//! distinct non-UTF-8 names stay distinct. A directory with no surviving
//! children composes to the digest of empty input.
//!
//! Two traversal strategies share this rule:
//! - [`digest_tree`] (stateless): recomputes everything, siblings in parallel.
//! - [`IncrementalHasher`](crate::cache::IncrementalHasher) (cached): sequential,
//!   reuses file digests verified unchanged.

pub mod stateless;

use std::ffi::OsStr;

use crate::scanner::{Digest, HashAlgorithm, StreamHasher};

pub use stateless::digest_tree;

/// Compose child digests into a directory digest.
///
/// Input order does not matter. Pairs are sorted by name bytes, and equal
/// names (never produced by one directory listing) fall back to the digest.
#[must_use]
pub fn compose<I, N>(children: I, algorithm: HashAlgorithm) -> Digest
where
    I: IntoIterator<Item = (N, Digest)>,
    N: AsRef<OsStr>,
{
    let mut children: Vec<(N, Digest)> = children.into_iter().collect();
    children.sort_unstable_by(|a, b| {
        name_bytes(&a.0)
            .cmp(name_bytes(&b.0))
            .then_with(|| a.1.cmp(&b.1))
    });

    let mut hasher = StreamHasher::new(algorithm);
    for (name, digest) in &children {
        hasher.update(name_bytes(name));
        hasher.update(b":");
        hasher.update(digest.as_str().as_bytes());
    }
    hasher.finalize()
}

fn name_bytes<N: AsRef<OsStr>>(name: &N) -> &[u8] {
    name.as_ref().as_encoded_bytes()
}
