//! Encrypted portable file backend
//!
//! Keeps every credential in a single envelope file
//! (`<root>/config/creds.enc.json`). No decrypted state is held between
//! calls: each operation reads, decrypts and parses the whole file, and each
//! mutation re-encrypts the whole document under a fresh salt and nonce and
//! atomically replaces the file.
//!
//! Concurrent writers in separate processes are not coordinated; the last
//! atomic replace wins.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::crypto::Passphrase;
use crate::error::VaultResult;
use crate::models::CredentialRecord;

use super::backend::{DoctorReport, StoreBackend};
use super::document::{decode_plaintext, encode_plaintext};
use super::envelope::{decode_envelope, encode_envelope, Envelope};
use super::file_io::{ensure_parent_dir, read_optional, write_atomic};

/// Single-file, passphrase-encrypted credential backend
#[derive(Debug)]
pub struct PortableFileBackend {
    creds_file: PathBuf,
    passphrase: Passphrase,
}

impl PortableFileBackend {
    pub const NAME: &'static str = "PortableFileBackend";

    /// Create a backend for the given credential file
    pub fn new(creds_file: impl Into<PathBuf>, passphrase: Passphrase) -> Self {
        Self {
            creds_file: creds_file.into(),
            passphrase,
        }
    }

    /// Path of the credential file
    pub fn path(&self) -> &Path {
        &self.creds_file
    }

    fn read_all(&self) -> VaultResult<Vec<CredentialRecord>> {
        let Some(text) = read_optional(&self.creds_file)? else {
            debug!(path = %self.creds_file.display(), "no credential file yet");
            return Ok(Vec::new());
        };

        let envelope = decode_envelope(&text)?;
        let plaintext = envelope.open(&self.passphrase)?;
        let records = decode_plaintext(&plaintext)?;

        debug!(
            path = %self.creds_file.display(),
            records = records.len(),
            "loaded credential file"
        );
        Ok(records)
    }

    fn write_all(&self, records: &[CredentialRecord]) -> VaultResult<()> {
        let plaintext = encode_plaintext(records)?;
        let envelope = Envelope::seal(&self.passphrase, &plaintext)?;
        let text = encode_envelope(&envelope)?;

        write_atomic(&self.creds_file, text.as_bytes())?;

        debug!(
            path = %self.creds_file.display(),
            records = records.len(),
            "wrote credential file"
        );
        Ok(())
    }
}

impl StoreBackend for PortableFileBackend {
    fn put(&self, record: CredentialRecord) -> VaultResult<()> {
        let mut records = self.read_all()?;
        records.retain(|r| !r.matches(record.persona(), record.provider_id()));
        records.push(record);
        self.write_all(&records)
    }

    fn get(&self, persona: &str, provider_id: &str) -> VaultResult<Option<CredentialRecord>> {
        Ok(self
            .read_all()?
            .into_iter()
            .find(|r| r.matches(persona, provider_id)))
    }

    fn list(&self) -> VaultResult<Vec<CredentialRecord>> {
        self.read_all()
    }

    fn delete(&self, persona: &str, provider_id: &str) -> VaultResult<bool> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| !r.matches(persona, provider_id));

        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records)?;
        Ok(true)
    }

    fn doctor(&self) -> DoctorReport {
        let result = ensure_parent_dir(&self.creds_file)
            .and_then(|()| self.read_all())
            .and_then(|records| self.write_all(&records));

        match result {
            Ok(()) => DoctorReport::ok(Self::NAME, self.creds_file.display().to_string()),
            Err(e) => DoctorReport::failed(Self::NAME, e.to_string()),
        }
    }
}
