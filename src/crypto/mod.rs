//! Cryptographic primitives for credvault
//!
//! PBKDF2-HMAC-SHA256 key derivation, AES-256-GCM authenticated encryption
//! and CSPRNG byte generation for the encrypted credential file.

pub mod encryption;
pub mod key_derivation;
pub mod passphrase;
pub mod random;

pub use encryption::{decrypt, encrypt, NONCE_LEN};
pub use key_derivation::{derive_key, DerivedKey, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
pub use passphrase::{Passphrase, PASSPHRASE_ENV};
pub use random::random_array;
