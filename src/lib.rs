//! dirhash - Deterministic Directory Digests
//!
//! Computes one digest for the combined content of a directory tree, either
//! statelessly with parallel fan-out ([`tree::digest_tree`]) or incrementally
//! with an in-memory cache that skips files verified unchanged
//! ([`cache::IncrementalHasher`]). Both produce the same digest for the same
//! tree and options.
//!
//! ```no_run
//! use dirhash::{digest_tree, IncrementalHasher, TraversalOptions};
//! use std::path::Path;
//!
//! let options = TraversalOptions::default().with_algorithm_name("sha256").unwrap();
//! let stateless = digest_tree(Path::new("."), &options).unwrap();
//!
//! let mut hasher = IncrementalHasher::new();
//! assert_eq!(hasher.digest_tree(Path::new("."), &options).unwrap(), stateless);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod scanner;
pub mod tree;

pub use cache::IncrementalHasher;
pub use error::{HashError, HashResult};
pub use scanner::{digest_file, Digest, HashAlgorithm, TraversalOptions};
pub use tree::digest_tree;
