//! Passphrase handling
//!
//! The passphrase is held only as transient key material: it is zeroed on
//! drop and never appears in Debug or Display output.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{VaultError, VaultResult};

/// Environment variable the CLI reads the passphrase from
pub const PASSPHRASE_ENV: &str = "CREDVAULT_PASSPHRASE";

/// A non-blank passphrase that zeros its contents on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase {
    inner: String,
}

impl Passphrase {
    /// Create a passphrase, rejecting blank input
    pub fn new(s: impl Into<String>) -> VaultResult<Self> {
        let inner = s.into();
        if inner.trim().is_empty() {
            return Err(VaultError::Config(
                "passphrase is empty; refusing to open an unencrypted store".to_string(),
            ));
        }
        Ok(Self { inner })
    }

    /// Read the passphrase from [`PASSPHRASE_ENV`]
    pub fn from_env() -> VaultResult<Self> {
        Self::from_env_var(PASSPHRASE_ENV)
    }

    /// Read the passphrase from a named environment variable
    pub fn from_env_var(name: &str) -> VaultResult<Self> {
        match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => Self::new(value),
            _ => Err(VaultError::Config(format!(
                "{} not set (required for the portable credential backend)",
                name
            ))),
        }
    }

    /// Get the passphrase bytes for key derivation
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase([REDACTED])")
    }
}

impl fmt::Display for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
