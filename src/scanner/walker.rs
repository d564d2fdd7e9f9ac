//! Single-level directory listing and entry classification.
//!
//! # Overview
//!
//! Both tree composers walk one directory level at a time. This module
//! provides the [`Walker`] which lists a directory and turns each child into
//! an [`Entry`] after applying the [`TraversalOptions`] filters:
//!
//! 1. Basenames matching the exclusion pattern are dropped.
//! 2. The entry is stat'ed. A failure is logged and drops that entry only.
//! 3. Symlinks are dropped unless `follow_symlinks` is set.
//! 4. Directories whose basename is in the ignore set are dropped.
//! 5. Anything that is neither a file nor a directory is dropped.
//!
//! Listing failure for the directory itself is fatal and returned as
//! [`HashError::ReadDir`].
//!
//! The extension allow-list is not applied here, it only concerns whether a
//! file is digested. See [`Walker::accepts_file`].
//!
//! # Example
//!
//! ```no_run
//! use dirhash::scanner::{TraversalOptions, Walker};
//! use std::path::Path;
//!
//! let options = TraversalOptions::default();
//! let walker = Walker::new(&options);
//! let entries: Vec<_> = walker
//!     .list(Path::new("."))
//!     .unwrap()
//!     .into_iter()
//!     .filter_map(|listed| walker.classify(listed))
//!     .collect();
//! println!("{} entries survive filtering", entries.len());
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{Entry, EntryKind, TraversalOptions};
use crate::error::{HashError, HashResult};

/// A raw child of a directory, before it has been stat'ed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Raw basename
    pub name: OsString,
    /// Full path
    pub path: PathBuf,
}

/// Lists directories and classifies their children under one set of options.
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    options: &'a TraversalOptions,
}

impl<'a> Walker<'a> {
    /// Create a walker borrowing the call's options.
    #[must_use]
    pub fn new(options: &'a TraversalOptions) -> Self {
        Self { options }
    }

    /// The options this walker applies.
    #[must_use]
    pub fn options(&self) -> &'a TraversalOptions {
        self.options
    }

    /// List the immediate children of `dir`.
    ///
    /// Order is whatever the OS reports; callers sort before composing.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::ReadDir`] if the directory cannot be opened or an
    /// error occurs while reading its entries.
    pub fn list(&self, dir: &Path) -> HashResult<Vec<ListedEntry>> {
        let read_err = |source: std::io::Error| HashError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut listed = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let name = entry.map_err(read_err)?.file_name();
            listed.push(ListedEntry {
                path: dir.join(&name),
                name,
            });
        }

        log::trace!("Listed {} entries in {}", listed.len(), dir.display());
        Ok(listed)
    }

    /// Apply name filters and stat one listed child.
    ///
    /// Returns `None` when the child is filtered out or cannot be stat'ed.
    #[must_use]
    pub fn classify(&self, listed: ListedEntry) -> Option<Entry> {
        let ListedEntry { name, path } = listed;
        let lossy = name.to_string_lossy().into_owned();

        if self.options.is_excluded_name(&lossy) {
            log::trace!("Excluding by pattern: {}", path.display());
            return None;
        }

        let metadata = if self.options.follow_symlinks {
            fs::metadata(&path)
        } else {
            fs::symlink_metadata(&path)
        };
        let metadata = match metadata {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Skipped unreadable file/dir {}: {}", path.display(), e);
                return None;
            }
        };

        if metadata.file_type().is_symlink() {
            log::trace!("Skipping symlink: {}", path.display());
            return None;
        }

        let kind = if metadata.is_dir() {
            if self.options.is_ignored_dir(&lossy) {
                log::trace!("Ignoring directory: {}", path.display());
                return None;
            }
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            log::trace!("Skipping special file: {}", path.display());
            return None;
        };

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        Some(Entry {
            name,
            path,
            kind,
            modified,
        })
    }

    /// List and classify in one pass, in OS order.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::ReadDir`] if the directory cannot be listed.
    pub fn entries(&self, dir: &Path) -> HashResult<Vec<Entry>> {
        Ok(self
            .list(dir)?
            .into_iter()
            .filter_map(|listed| self.classify(listed))
            .collect())
    }

    /// Whether a file entry passes the extension allow-list.
    #[must_use]
    pub fn accepts_file(&self, path: &Path) -> bool {
        let extension = path.extension().map(|e| e.to_string_lossy());
        self.options.allows_extension(extension.as_deref())
    }
}
