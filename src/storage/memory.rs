//! In-memory credential backend
//!
//! Unencrypted and process-local; for tests and callers that need a store
//! without a passphrase or a filesystem.

use std::sync::RwLock;

use crate::error::{VaultError, VaultResult};
use crate::models::CredentialRecord;

use super::backend::{DoctorReport, StoreBackend};

/// Backend holding records in a `Vec`, in insertion order
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<Vec<CredentialRecord>>,
}

impl MemoryBackend {
    pub const NAME: &'static str = "MemoryBackend";

    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreBackend for MemoryBackend {
    fn put(&self, record: CredentialRecord) -> VaultResult<()> {
        let mut records = self.records.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        records.retain(|r| !r.matches(record.persona(), record.provider_id()));
        records.push(record);
        Ok(())
    }

    fn get(&self, persona: &str, provider_id: &str) -> VaultResult<Option<CredentialRecord>> {
        let records = self.records.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(records
            .iter()
            .find(|r| r.matches(persona, provider_id))
            .cloned())
    }

    fn list(&self) -> VaultResult<Vec<CredentialRecord>> {
        let records = self.records.read().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(records.clone())
    }

    fn delete(&self, persona: &str, provider_id: &str) -> VaultResult<bool> {
        let mut records = self.records.write().map_err(|e| {
            VaultError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let before = records.len();
        records.retain(|r| !r.matches(persona, provider_id));
        Ok(records.len() != before)
    }

    fn doctor(&self) -> DoctorReport {
        match self.records.read() {
            Ok(records) => DoctorReport::ok(Self::NAME, format!("{} records", records.len())),
            Err(e) => DoctorReport::failed(Self::NAME, e.to_string()),
        }
    }
}
