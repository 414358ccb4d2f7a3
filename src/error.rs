//! Custom error types for credvault
//!
//! This module defines the error hierarchy for the vault using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for credvault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Configuration-related errors (e.g. no passphrase available)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Envelope or document structure is malformed or has an unsupported version
    #[error("Format error: {0}")]
    Format(String),

    /// The authentication tag did not verify.
    ///
    /// Wrong passphrase and a modified file are indistinguishable.
    #[error("Authentication failed: wrong passphrase or corrupted credential file")]
    Authentication,

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Cipher setup or encryption errors that are not tag failures
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Storage errors (e.g. a poisoned lock)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for caller-supplied data
    #[error("Validation error: {0}")]
    Validation(String),
}

impl VaultError {
    /// Check if this is an authentication failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Check if this is a format error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for credvault operations
pub type VaultResult<T> = Result<T, VaultError>;
