//! Cache key normalization for filesystem paths.
//!
//! The incremental engine keys its cache by path. Two spellings of the same
//! location must map to one key, so keys are:
//!
//! - absolute (relative paths are resolved against the current directory),
//! - lexically cleaned (`.` removed, `..` folded into its parent),
//! - Unicode NFC, so that a macOS NFD name and its NFC spelling agree.
//!
//! Symlinks are not resolved; a link and its target keep separate records.
//!
//! # Example
//!
//! ```
//! use dirhash::scanner::path_utils::normalize_path_str;
//!
//! let nfc = "café.txt";           // é is U+00E9
//! let nfd = "cafe\u{0301}.txt";   // e + combining accent
//! assert_eq!(normalize_path_str(nfc), normalize_path_str(nfd));
//! ```

use std::path::{Component, Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::error::{HashError, HashResult};

/// Normalize a path string to NFC (Composed) form.
#[must_use]
pub fn normalize_path_str(s: &str) -> String {
    s.nfc().collect()
}

/// Normalize a path to NFC form.
///
/// Paths that are not valid UTF-8 are returned unchanged.
#[must_use]
pub fn normalize_pathbuf(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) if !unicode_normalization::is_nfc(s) => PathBuf::from(normalize_path_str(s)),
        _ => path.to_path_buf(),
    }
}

/// Remove `.` components and fold `..` into the preceding component.
///
/// Purely lexical: the filesystem is not consulted. A `..` at the root stays
/// at the root.
#[must_use]
pub fn lexical_clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    cleaned.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                );
                if at_root {
                    if cleaned.as_os_str().is_empty() {
                        cleaned.push(Component::ParentDir);
                    }
                } else if matches!(cleaned.components().next_back(), Some(Component::ParentDir)) {
                    cleaned.push(Component::ParentDir);
                } else {
                    cleaned.pop();
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Build the cache key for a path: absolute, cleaned, NFC.
///
/// # Errors
///
/// Returns [`HashError::InvalidPath`] if the current directory is needed and
/// cannot be determined, or the path is empty.
pub fn cache_key(path: &Path) -> HashResult<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|source| HashError::InvalidPath {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_pathbuf(&lexical_clean(&absolute)))
}
