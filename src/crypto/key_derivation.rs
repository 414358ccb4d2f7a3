//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives the AES-256 key from the user passphrase and a per-write salt.
//! The iteration count is fixed so that every file written by any version of
//! the vault can be decrypted with the same derivation.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of PBKDF2 iterations
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes (128 bits)
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (256 bits, for AES-256)
pub const KEY_LEN: usize = 32;

/// A derived encryption key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive an encryption key from a passphrase and salt
///
/// Deterministic: the same passphrase and salt always yield the same key.
pub fn derive_key(passphrase: &[u8], salt: &[u8; SALT_LEN]) -> DerivedKey {
    derive_key_with_iterations(passphrase, salt, PBKDF2_ITERATIONS)
}

fn derive_key_with_iterations(passphrase: &[u8], salt: &[u8], iterations: u32) -> DerivedKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase, salt, iterations, &mut key);
    DerivedKey { key }
}
