//! Scanner module for directory listing, entry filtering and file digests.
//!
//! This module provides functionality for:
//! - Listing one directory level and classifying its children
//! - Applying [`TraversalOptions`] filters (exclusion pattern, ignored
//!   directories, extension allow-list, symlink policy)
//! - Streaming file digests over named algorithms
//! - Unicode path normalization for cache keys
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Single-level listing and per-entry filtering
//! - [`hasher`]: Named hash algorithms and streaming file digests
//! - [`path_utils`]: Absolute, NFC-normalized paths
//!
//! # Example
//!
//! ```no_run
//! use dirhash::scanner::{TraversalOptions, Walker};
//! use std::path::Path;
//!
//! let options = TraversalOptions::default().with_extensions(["rs", "toml"]);
//! let walker = Walker::new(&options);
//! for listed in walker.list(Path::new(".")).unwrap() {
//!     if let Some(entry) = walker.classify(listed) {
//!         println!("{} ({:?})", entry.name.to_string_lossy(), entry.kind);
//!     }
//! }
//! ```

pub mod hasher;
pub mod path_utils;
pub mod walker;

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::SystemTime;

use regex::Regex;

use crate::error::{HashError, HashResult};

// Re-export main types
pub use hasher::{
    digest_bytes, digest_file, Digest, HashAlgorithm, StreamHasher, FINGERPRINT_ALGORITHM,
};
pub use walker::{ListedEntry, Walker};

/// Directory names ignored when no explicit list is given.
pub const DEFAULT_IGNORE_DIRS: [&str; 2] = ["node_modules", ".git"];

/// Kind of a surviving directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file (or a symlink to one, when symlinks are followed)
    File,
    /// A directory (or a symlink to one, when symlinks are followed)
    Directory,
}

/// A child entry that passed name filtering and could be stat'ed.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Raw basename, hashed and sorted by its bytes
    pub name: OsString,
    /// Full path (parent joined with the basename)
    pub path: PathBuf,
    /// File or directory
    pub kind: EntryKind,
    /// Last modification time
    pub modified: SystemTime,
}

impl Entry {
    /// Whether this entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Per-call traversal configuration.
///
/// Shared read-only by every level of one call tree.
#[derive(Debug, Clone)]
pub struct TraversalOptions {
    /// Extension allow-list, compared case-insensitively with or without a
    /// leading dot. Empty allows every file.
    pub ext: Vec<String>,

    /// Directory basenames to skip, compared case-insensitively.
    pub ignore_dirs: Vec<String>,

    /// Pattern tested against every entry basename; matches are dropped.
    pub ignore_files: Option<Regex>,

    /// Algorithm for file digests and directory composition.
    pub algorithm: HashAlgorithm,

    /// Follow symbolic links (stat semantics). When false, symlinks are skipped.
    /// Warning: symlink cycles are not detected.
    pub follow_symlinks: bool,

    /// Thread count for the stateless composer. `None` uses the global rayon pool.
    pub io_threads: Option<usize>,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            ext: Vec::new(),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|d| (*d).to_string()).collect(),
            ignore_files: None,
            algorithm: HashAlgorithm::default(),
            follow_symlinks: true,
            io_threads: None,
        }
    }
}

impl TraversalOptions {
    /// Set the extension allow-list.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, ext: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ext = ext.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the ignored directory names.
    #[must_use]
    pub fn with_ignore_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the exclusion pattern from a compiled regex.
    #[must_use]
    pub fn with_ignore_regex(mut self, pattern: Regex) -> Self {
        self.ignore_files = Some(pattern);
        self
    }

    /// Compile and set the exclusion pattern.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidPattern`] if the pattern does not compile.
    pub fn with_ignore_files(self, pattern: &str) -> HashResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| HashError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.with_ignore_regex(regex))
    }

    /// Set the hash algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the hash algorithm by name.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::UnsupportedAlgorithm`] for unknown names.
    pub fn with_algorithm_name(self, name: &str) -> HashResult<Self> {
        Ok(self.with_algorithm(name.parse()?))
    }

    /// Set whether symbolic links are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Run the stateless composer in a dedicated pool of `threads` threads.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = Some(threads.max(1));
        self
    }

    /// Whether a directory basename is in the ignore set.
    #[must_use]
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.ignore_dirs.iter().any(|d| d.to_lowercase() == name)
    }

    /// Whether a basename matches the exclusion pattern.
    #[must_use]
    pub fn is_excluded_name(&self, name: &str) -> bool {
        self.ignore_files
            .as_ref()
            .is_some_and(|re| re.is_match(name))
    }

    /// Whether a file with this lowercased extension passes the allow-list.
    #[must_use]
    pub fn allows_extension(&self, extension: Option<&str>) -> bool {
        if self.ext.is_empty() {
            return true;
        }
        let Some(extension) = extension else {
            return false;
        };
        let extension = extension.to_lowercase();
        self.ext
            .iter()
            .any(|e| e.trim_start_matches('.').to_lowercase() == extension)
    }
}
