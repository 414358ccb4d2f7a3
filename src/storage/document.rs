//! Plaintext document codec
//!
//! The decrypted payload of the envelope:
//!
//! ```text
//! { "version": 1, "entries": [ { "persona": "...", "provider": "...", "fields": { ... } } ] }
//! ```
//!
//! The codec does not enforce key uniqueness; that is the backend's job.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{VaultError, VaultResult};
use crate::models::CredentialRecord;

/// The only plaintext document version this build reads or writes
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentOut<'a> {
    version: u32,
    entries: &'a [CredentialRecord],
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

#[derive(Deserialize)]
struct DocumentIn {
    entries: Vec<CredentialRecord>,
}

/// Serialize the record list to plaintext bytes
pub fn encode_plaintext(records: &[CredentialRecord]) -> VaultResult<Zeroizing<Vec<u8>>> {
    let doc = DocumentOut {
        version: DOCUMENT_VERSION,
        entries: records,
    };
    Ok(Zeroizing::new(serde_json::to_vec(&doc)?))
}

/// Parse plaintext bytes into the record list
pub fn decode_plaintext(bytes: &[u8]) -> VaultResult<Vec<CredentialRecord>> {
    let probe: VersionProbe = serde_json::from_slice(bytes)
        .map_err(|e| VaultError::Format(format!("Malformed credential document: {}", e)))?;

    match probe.version {
        Some(DOCUMENT_VERSION) => {}
        Some(other) => {
            return Err(VaultError::Format(format!(
                "Unsupported credential document version: {}",
                other
            )));
        }
        None => {
            return Err(VaultError::Format(
                "Credential document has no version".to_string(),
            ));
        }
    }

    // serde errors here can quote input, which is secret; keep only the position
    let doc: DocumentIn = serde_json::from_slice(bytes).map_err(|e| {
        VaultError::Format(format!(
            "Malformed credential entry at line {} column {}",
            e.line(),
            e.column()
        ))
    })?;

    Ok(doc.entries)
}
