//! Path management for credvault
//!
//! ## Root Resolution Order
//!
//! 1. Explicit override (the `--root` flag)
//! 2. `CREDVAULT_HOME` environment variable (if set and non-blank)
//! 3. `~/.credvault` (`%USERPROFILE%\.credvault` on Windows)

use std::path::{Path, PathBuf};

use crate::error::{VaultError, VaultResult};

/// Environment variable overriding the store root
pub const HOME_ENV: &str = "CREDVAULT_HOME";

/// Directory name used under the user's home directory
const DEFAULT_DIR_NAME: &str = ".credvault";

/// Manages all paths used by credvault
#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// Store root
    root: PathBuf,
}

impl VaultPaths {
    /// Resolve the store root from an optional override, the environment, or
    /// the home directory
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the home directory
    /// cannot be determined.
    pub fn resolve(override_root: Option<&Path>) -> VaultResult<Self> {
        let root = match override_root {
            Some(path) => path.to_path_buf(),
            None => match std::env::var(HOME_ENV) {
                Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
                _ => home_dir()?.join(DEFAULT_DIR_NAME),
            },
        };

        Ok(Self {
            root: make_absolute(root)?,
        })
    }

    /// Create VaultPaths with a fixed root (useful for testing)
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the config directory (<root>/config/)
    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Get the path to the encrypted credential file
    pub fn creds_file(&self) -> PathBuf {
        self.config_dir().join("creds.enc.json")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir().join("settings.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.config_dir().join("audit.log")
    }
}

fn make_absolute(path: PathBuf) -> VaultResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir()
        .map_err(|e| VaultError::Config(format!("Could not determine current directory: {}", e)))?;
    Ok(cwd.join(path))
}

#[cfg(not(windows))]
fn home_dir() -> VaultResult<PathBuf> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| VaultError::Config("HOME environment variable not set".into()))
}

#[cfg(windows)]
fn home_dir() -> VaultResult<PathBuf> {
    std::env::var("USERPROFILE")
        .map(PathBuf::from)
        .map_err(|_| VaultError::Config("Could not determine USERPROFILE directory".into()))
}
