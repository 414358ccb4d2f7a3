//! Cryptographically secure random bytes
//!
//! Salts and nonces both come from the operating system CSPRNG.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

/// Generate a fixed-size array of random bytes
pub fn random_array<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_arrays_differ() {
        let a: [u8; 16] = random_array();
        let b: [u8; 16] = random_array();
        assert_ne!(a, b);
    }
}
