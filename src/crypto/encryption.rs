//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated encryption for the credential document. The caller
//! supplies the nonce; the storage layer draws a fresh salt and nonce for
//! every write, so a (key, nonce) pair is never reused.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use zeroize::Zeroizing;

use crate::error::{VaultError, VaultResult};

use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_LEN: usize = 12;

fn cipher(key: &DerivedKey) -> VaultResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))
}

/// Encrypt plaintext using AES-256-GCM
///
/// The returned bytes are the ciphertext followed by the 128-bit tag.
pub fn encrypt(key: &DerivedKey, nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> VaultResult<Vec<u8>> {
    cipher(key)?
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| VaultError::Encryption(format!("Encryption failed: {}", e)))
}

/// Decrypt ciphertext using AES-256-GCM
///
/// Any tag mismatch is reported as [`VaultError::Authentication`] with no
/// further detail.
pub fn decrypt(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> VaultResult<Zeroizing<Vec<u8>>> {
    cipher(key)?
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| VaultError::Authentication)
}
