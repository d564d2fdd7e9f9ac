//! Error types for directory hashing.
//!
//! Errors fall into three groups:
//! - Fatal I/O: a directory listing or a file read failed. The whole call aborts.
//! - Configuration: an unknown algorithm name or an invalid exclusion pattern.
//!   These are raised while building [`TraversalOptions`](crate::scanner::TraversalOptions),
//!   before any traversal work starts.
//! - Path resolution: the root could not be turned into an absolute cache key.
//!
//! Per-entry stat failures are not errors. They are logged and the entry is
//! left out of the digest.

use std::path::PathBuf;

/// Errors that can occur while computing file or tree digests.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The hash algorithm name is not one of the supported algorithms.
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The exclusion pattern is not a valid regular expression.
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as given
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A directory's own entries could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        /// Directory that could not be listed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened or read while hashing.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A path could not be resolved to an absolute cache key.
    #[error("Invalid path {path}: {source}")]
    InvalidPath {
        /// Path as given by the caller
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::ReadDir { path, .. } | Self::Io { path, .. } | Self::InvalidPath { path, .. } => {
                Some(path)
            }
            Self::UnsupportedAlgorithm(_) | Self::InvalidPattern { .. } => None,
        }
    }

    /// Whether this error was caused by configuration rather than I/O.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAlgorithm(_) | Self::InvalidPattern { .. }
        )
    }
}

/// Convenience alias for results carrying a [`HashError`].
pub type HashResult<T> = Result<T, HashError>;
