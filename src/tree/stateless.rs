//! Stateless tree digests with parallel fan-out.
//!
//! # Overview
//!
//! [`digest_tree`] recomputes every included file on each call. All children
//! of one directory are processed as independent rayon tasks: each is
//! classified, then either recursed into or streamed through the file hasher.
//! Results are joined before the parent digest is composed, so nothing is
//! shared between siblings.
//!
//! # Failure semantics
//!
//! - A directory that cannot be listed aborts the whole call.
//! - A child that cannot be stat'ed is logged and left out.
//! - A file that cannot be read aborts the whole call.
//!
//! # Resources
//!
//! Fan-out is limited by the rayon pool. With
//! [`TraversalOptions::io_threads`] set, the call runs in a dedicated pool of
//! that size to keep disk contention and open descriptors in check.

use std::ffi::OsString;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use super::compose;
use crate::error::HashResult;
use crate::scanner::{digest_file, Digest, Entry, EntryKind, TraversalOptions, Walker};

/// Compute the digest of the tree rooted at `root`.
///
/// # Errors
///
/// Returns [`HashError::ReadDir`](crate::error::HashError::ReadDir) if any
/// directory in the tree cannot be listed and
/// [`HashError::Io`](crate::error::HashError::Io) if an included file
/// cannot be read.
///
/// # Example
///
/// ```no_run
/// use dirhash::scanner::TraversalOptions;
/// use dirhash::tree::digest_tree;
/// use std::path::Path;
///
/// let options = TraversalOptions::default().with_extensions(["rs"]);
/// let digest = digest_tree(Path::new("src"), &options).unwrap();
/// println!("{digest}");
/// ```
pub fn digest_tree(root: &Path, options: &TraversalOptions) -> HashResult<Digest> {
    let started = Instant::now();
    let walker = Walker::new(options);

    let digest = match options.io_threads {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| digest_dir(root, walker)),
            Err(e) => {
                log::warn!(
                    "Failed to create thread pool with {} threads, using global pool: {}",
                    threads,
                    e
                );
                digest_dir(root, walker)
            }
        },
        None => digest_dir(root, walker),
    }?;

    log::debug!(
        "Tree digest for {} ({}) computed in {:?}",
        root.display(),
        options.algorithm,
        started.elapsed()
    );
    Ok(digest)
}

fn digest_dir(dir: &Path, walker: Walker<'_>) -> HashResult<Digest> {
    let children = walker
        .list(dir)?
        .into_par_iter()
        .filter_map(|listed| walker.classify(listed))
        .filter_map(|entry| digest_entry(entry, walker).transpose())
        .collect::<HashResult<Vec<(OsString, Digest)>>>()?;

    Ok(compose(children, walker.options().algorithm))
}

fn digest_entry(entry: Entry, walker: Walker<'_>) -> HashResult<Option<(OsString, Digest)>> {
    match entry.kind {
        EntryKind::Directory => {
            let digest = digest_dir(&entry.path, walker)?;
            Ok(Some((entry.name, digest)))
        }
        EntryKind::File if walker.accepts_file(&entry.path) => {
            let digest = digest_file(&entry.path, walker.options().algorithm)?;
            log::trace!("Hashed {}", entry.path.display());
            Ok(Some((entry.name, digest)))
        }
        EntryKind::File => {
            log::trace!("Skipping file due to extension filter: {}", entry.path.display());
            Ok(None)
        }
    }
}
