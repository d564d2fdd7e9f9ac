//! Streaming file digests over named hash algorithms.
//!
//! # Overview
//! This module provides [`HashAlgorithm`], the closed set of algorithms a caller
//! may select by name, the [`Digest`] hex value type, and [`digest_file`] which
//! streams a file through the selected algorithm with bounded memory.
//!
//! # Example
//!
//! ```no_run
//! use dirhash::scanner::hasher::{digest_file, HashAlgorithm};
//! use std::path::Path;
//!
//! let algorithm: HashAlgorithm = "sha256".parse().unwrap();
//! let digest = digest_file(Path::new("Cargo.toml"), algorithm).unwrap();
//! assert_eq!(digest.as_str().len(), 64);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Digest as _;
use sha2::{Sha256, Sha512};

use crate::error::{HashError, HashResult};

/// Read buffer size for streaming file contents (64 KiB).
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Algorithm used for cache fingerprints, independent of the caller's choice.
pub const FINGERPRINT_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha1;

/// Supported hash algorithms, selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HashAlgorithm {
    /// MD5, 128-bit. Fast and the default tree digest.
    #[default]
    Md5,
    /// SHA-1, 160-bit.
    Sha1,
    /// SHA-256, 256-bit.
    Sha256,
    /// SHA-512, 512-bit.
    Sha512,
    /// BLAKE3, 256-bit.
    Blake3,
}

impl HashAlgorithm {
    /// All supported algorithms.
    pub const ALL: [HashAlgorithm; 5] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha512,
        Self::Blake3,
    ];

    /// Canonical lowercase name of the algorithm.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        }
    }

    /// Length of the hex-encoded digest produced by this algorithm.
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 | Self::Blake3 => 64,
            Self::Sha512 => 128,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            _ => Err(HashError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = HashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HashAlgorithm> for String {
    fn from(algorithm: HashAlgorithm) -> Self {
        algorithm.name().to_string()
    }
}

/// A hex-encoded digest.
///
/// Opaque value type; two digests are equal when their hex strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(String);

impl Digest {
    /// The hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the digest, returning the hex string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Digest {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Digest {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Running hash state for one of the supported algorithms.
#[derive(Clone)]
pub enum StreamHasher {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
    Blake3(Box<blake3::Hasher>),
}

impl StreamHasher {
    /// Start a fresh hash context.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Md5(Md5::new()),
            HashAlgorithm::Sha1 => Self::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
            HashAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    /// Feed bytes into the hash state.
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha1(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
            Self::Blake3(h) => {
                h.update(data);
            }
        }
    }

    /// Finalize to a lowercase hex digest.
    #[must_use]
    pub fn finalize(self) -> Digest {
        let hex = match self {
            Self::Md5(h) => hex::encode(h.finalize()),
            Self::Sha1(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Sha512(h) => hex::encode(h.finalize()),
            Self::Blake3(h) => hex::encode(h.finalize().as_bytes()),
        };
        Digest(hex)
    }
}

impl fmt::Debug for StreamHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Md5(_) => "md5",
            Self::Sha1(_) => "sha1",
            Self::Sha256(_) => "sha256",
            Self::Sha512(_) => "sha512",
            Self::Blake3(_) => "blake3",
        };
        f.debug_tuple("StreamHasher").field(&name).finish()
    }
}

/// Digest an in-memory byte slice.
#[must_use]
pub fn digest_bytes(data: &[u8], algorithm: HashAlgorithm) -> Digest {
    let mut hasher = StreamHasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}

/// Digest a file's contents by streaming it in [`READ_BUFFER_SIZE`] chunks.
///
/// # Errors
///
/// Returns [`HashError::Io`] carrying the path when the file cannot be
/// opened or a read fails mid-stream.
pub fn digest_file(path: &Path, algorithm: HashAlgorithm) -> HashResult<Digest> {
    let io_err = |source: std::io::Error| HashError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let mut hasher = StreamHasher::new(algorithm);
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buffer[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(io_err(e)),
        }
    }

    Ok(hasher.finalize())
}
