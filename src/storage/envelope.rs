//! On-disk envelope codec
//!
//! The credential file is a small JSON object carrying the format version and
//! the base64-encoded salt, nonce and authenticated ciphertext:
//!
//! ```text
//! { "v": 1, "salt": "<base64>", "nonce": "<base64>", "ct": "<base64>" }
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::{self, Passphrase, NONCE_LEN, SALT_LEN};
use crate::error::{VaultError, VaultResult};

/// The only envelope version this build reads or writes
pub const ENVELOPE_VERSION: u32 = 1;

/// Decoded envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub version: u32,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext followed by the GCM tag
    pub ciphertext: Vec<u8>,
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    v: u32,
    salt: &'a str,
    nonce: &'a str,
    ct: &'a str,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    v: Option<u32>,
    salt: Option<String>,
    nonce: Option<String>,
    ct: Option<String>,
}

impl Envelope {
    /// Encrypt `plaintext` under a key derived from a fresh salt, with a fresh nonce
    pub fn seal(passphrase: &Passphrase, plaintext: &[u8]) -> VaultResult<Self> {
        let salt: [u8; SALT_LEN] = crypto::random_array();
        let nonce: [u8; NONCE_LEN] = crypto::random_array();
        let key = crypto::derive_key(passphrase.as_bytes(), &salt);
        let ciphertext = crypto::encrypt(&key, &nonce, plaintext)?;

        Ok(Self {
            version: ENVELOPE_VERSION,
            salt,
            nonce,
            ciphertext,
        })
    }

    /// Derive the key from the stored salt and decrypt
    pub fn open(&self, passphrase: &Passphrase) -> VaultResult<Zeroizing<Vec<u8>>> {
        let key = crypto::derive_key(passphrase.as_bytes(), &self.salt);
        crypto::decrypt(&key, &self.nonce, &self.ciphertext)
    }
}

/// Serialize an envelope to its JSON text form
pub fn encode_envelope(envelope: &Envelope) -> VaultResult<String> {
    let salt = STANDARD.encode(envelope.salt);
    let nonce = STANDARD.encode(envelope.nonce);
    let ct = STANDARD.encode(&envelope.ciphertext);

    let out = EnvelopeOut {
        v: envelope.version,
        salt: &salt,
        nonce: &nonce,
        ct: &ct,
    };
    Ok(serde_json::to_string(&out)?)
}

/// Parse an envelope from its JSON text form
///
/// Unknown versions are rejected rather than parsed best-effort.
pub fn decode_envelope(text: &str) -> VaultResult<Envelope> {
    let raw: EnvelopeIn = serde_json::from_str(text)
        .map_err(|e| VaultError::Format(format!("Malformed credential envelope: {}", e)))?;

    match raw.v {
        Some(ENVELOPE_VERSION) => {}
        Some(other) => {
            return Err(VaultError::Format(format!(
                "Unsupported credential envelope version: {}",
                other
            )))
        }
        None => {
            return Err(VaultError::Format(
                "Credential envelope has no version".to_string(),
            ))
        }
    }

    let salt = decode_fixed::<SALT_LEN>("salt", raw.salt)?;
    let nonce = decode_fixed::<NONCE_LEN>("nonce", raw.nonce)?;
    let ciphertext = decode_field("ct", raw.ct)?;

    Ok(Envelope {
        version: ENVELOPE_VERSION,
        salt,
        nonce,
        ciphertext,
    })
}

fn decode_field(name: &str, value: Option<String>) -> VaultResult<Vec<u8>> {
    let value = value.ok_or_else(|| {
        VaultError::Format(format!("Credential envelope is missing '{}'", name))
    })?;
    STANDARD
        .decode(value.as_bytes())
        .map_err(|e| VaultError::Format(format!("Invalid base64 in '{}': {}", name, e)))
}

fn decode_fixed<const N: usize>(name: &str, value: Option<String>) -> VaultResult<[u8; N]> {
    let bytes = decode_field(name, value)?;
    bytes.as_slice().try_into().map_err(|_| {
        VaultError::Format(format!(
            "Invalid '{}' length: expected {}, got {}",
            name,
            N,
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            version: ENVELOPE_VERSION,
            salt: [1u8; SALT_LEN],
            nonce: [2u8; NONCE_LEN],
            ciphertext: vec![9, 8, 7, 6],
        }
    }

    #[test]
    fn test_encode_shape() {
        let text = encode_envelope(&sample()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["v"], 1);
        assert_eq!(json["salt"], STANDARD.encode([1u8; SALT_LEN]));
        assert_eq!(json["nonce"], STANDARD.encode([2u8; NONCE_LEN]));
        assert_eq!(json["ct"], "CQgHBg==");
    }

    #[test]
    fn test_decode_encoded() {
        let text = encode_envelope(&sample()).unwrap();
        assert_eq!(decode_envelope(&text).unwrap(), sample());
    }

    #[test]
    fn test_unknown_version_rejected() {
        let text = r#"{"v": 2, "salt": "", "nonce": "", "ct": ""}"#;
        let err = decode_envelope(text).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("version: 2"));
    }

    #[test]
    fn test_missing_version_rejected() {
        let err = decode_envelope(r#"{"salt": "", "nonce": "", "ct": ""}"#).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut json: serde_json::Value =
            serde_json::from_str(&encode_envelope(&sample()).unwrap()).unwrap();
        json.as_object_mut().unwrap().remove("nonce");

        let err = decode_envelope(&json.to_string()).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("nonce"));
    }

    #[test]
    fn test_bad_base64_rejected() {
        let text = r#"{"v": 1, "salt": "!!!", "nonce": "AAAAAAAAAAAAAAAA", "ct": "AA=="}"#;
        assert!(decode_envelope(text).unwrap_err().is_format());
    }

    #[test]
    fn test_wrong_salt_length_rejected() {
        let text = format!(
            r#"{{"v": 1, "salt": "{}", "nonce": "{}", "ct": "AA=="}}"#,
            STANDARD.encode([0u8; 8]),
            STANDARD.encode([0u8; NONCE_LEN])
        );
        let err = decode_envelope(&text).unwrap_err();
        assert!(err.to_string().contains("expected 16, got 8"));
    }

    #[test]
    fn test_not_json_rejected() {
        assert!(decode_envelope("not json at all").unwrap_err().is_format());
    }

    #[test]
    fn test_seal_and_open() {
        let passphrase = Passphrase::new("p1").unwrap();
        let envelope = Envelope::seal(&passphrase, b"plaintext document").unwrap();
        assert_eq!(
            envelope.open(&passphrase).unwrap().as_slice(),
            b"plaintext document"
        );
    }

    #[test]
    fn test_seal_uses_fresh_salt_and_nonce() {
        let passphrase = Passphrase::new("p1").unwrap();
        let first = Envelope::seal(&passphrase, b"same").unwrap();
        let second = Envelope::seal(&passphrase, b"same").unwrap();
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn test_open_with_wrong_passphrase() {
        let envelope = Envelope::seal(&Passphrase::new("p1").unwrap(), b"secret").unwrap();
        let err = envelope.open(&Passphrase::new("wrong").unwrap()).unwrap_err();
        assert!(err.is_authentication());
    }
}
