//! Layered configuration for traversal options.
//!
//! Settings are merged in this order, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `dirhash.toml` in the platform config directory
//! 3. `DIRHASH_*` environment variables (`__` separates nested keys)
//!
//! A [`HashConfig`] is plain data. Converting it to
//! [`TraversalOptions`] validates the algorithm name and compiles the
//! exclusion pattern, so configuration errors surface before any traversal.
//!
//! ```toml
//! algorithm = "sha256"
//! ext = ["rs", "toml"]
//! ignore_dirs = ["target", ".git"]
//! ignore_files = '^\.DS_Store$'
//! io_threads = 4
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::HashError;
use crate::scanner::{HashAlgorithm, TraversalOptions, DEFAULT_IGNORE_DIRS};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DIRHASH_";

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "dirhash.toml";

/// Serializable traversal settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Extension allow-list; empty allows every file.
    pub ext: Vec<String>,
    /// Directory basenames to skip.
    pub ignore_dirs: Vec<String>,
    /// Regex tested against entry basenames.
    pub ignore_files: Option<String>,
    /// Hash algorithm name.
    pub algorithm: HashAlgorithm,
    /// Follow symbolic links.
    pub follow_symlinks: bool,
    /// Thread count for stateless hashing.
    pub io_threads: Option<usize>,
}

impl Default for HashConfig {
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

impl HashConfig {
    /// Load defaults, the platform config file and environment overrides.
    ///
    /// # Errors
    ///
    /// Fails if the config file or an environment value cannot be parsed.
    pub fn load() -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = Self::config_path() {
            log::debug!("Looking for config at {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to load configuration")?;
        Ok(config)
    }

    /// Load defaults overlaid with one explicit TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .extract()
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Write this configuration as TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails on serialization or I/O errors.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Platform-specific config file path, if a home directory is known.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dirhash", "dirhash")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Validate and convert into traversal options.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidPattern`] if `ignore_files` does not compile.
    pub fn to_options(&self) -> Result<TraversalOptions, HashError> {
        TraversalOptions::try_from(self)
    }
}

impl TryFrom<&HashConfig> for TraversalOptions {
    type Error = HashError;

    fn try_from(config: &HashConfig) -> Result<Self, Self::Error> {
        let mut options = TraversalOptions::default()
            .with_extensions(config.ext.iter().cloned())
            .with_ignore_dirs(config.ignore_dirs.iter().cloned())
            .with_algorithm(config.algorithm)
            .with_follow_symlinks(config.follow_symlinks);
        if let Some(pattern) = &config.ignore_files {
            options = options.with_ignore_files(pattern)?;
        }
        if let Some(threads) = config.io_threads {
            options = options.with_io_threads(threads);
        }
        Ok(options)
    }
}
