//! Storage layer for credvault
//!
//! The encrypted portable file backend, its envelope and document codecs,
//! atomic file I/O, and the [`CredentialStore`] facade callers go through.

pub mod backend;
pub mod document;
pub mod envelope;
pub mod file_io;
pub mod memory;
pub mod portable;

pub use backend::{DoctorReport, StoreBackend};
pub use document::{decode_plaintext, encode_plaintext, DOCUMENT_VERSION};
pub use envelope::{decode_envelope, encode_envelope, Envelope, ENVELOPE_VERSION};
pub use file_io::write_atomic;
pub use memory::MemoryBackend;
pub use portable::PortableFileBackend;

use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{Settings, VaultPaths};
use crate::crypto::Passphrase;
use crate::error::VaultResult;
use crate::models::CredentialRecord;

/// Facade for credential access
///
/// Forwards to the active backend and records successful mutations in the
/// audit log when one is attached.
pub struct CredentialStore {
    backend: Box<dyn StoreBackend>,
    audit: Option<AuditLogger>,
}

impl CredentialStore {
    /// Open the portable file store under `paths` with an explicit passphrase
    pub fn open(paths: &VaultPaths, passphrase: Passphrase, settings: &Settings) -> Self {
        let backend = PortableFileBackend::new(paths.creds_file(), passphrase);
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Self {
            backend: Box::new(backend),
            audit,
        }
    }

    /// Open the portable file store using the passphrase from the environment
    ///
    /// Fails with a configuration error before touching the filesystem if no
    /// passphrase is set.
    pub fn open_from_env(paths: &VaultPaths, settings: &Settings) -> VaultResult<Self> {
        Ok(Self::open(paths, Passphrase::from_env()?, settings))
    }

    /// Wrap an arbitrary backend without auditing
    pub fn with_backend(backend: Box<dyn StoreBackend>) -> Self {
        Self {
            backend,
            audit: None,
        }
    }

    /// Attach an audit logger
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Store a record, replacing any record with the same persona and provider
    pub fn put(&self, record: CredentialRecord) -> VaultResult<()> {
        let entry = AuditEntry::put(&record);
        self.backend.put(record)?;
        info!(persona = %entry.persona, provider = %entry.provider, "stored credentials");
        self.record(&entry);
        Ok(())
    }

    /// Look up a record
    pub fn get(&self, persona: &str, provider_id: &str) -> VaultResult<Option<CredentialRecord>> {
        self.backend.get(persona, provider_id)
    }

    /// All records in stored order
    pub fn list(&self) -> VaultResult<Vec<CredentialRecord>> {
        self.backend.list()
    }

    /// Remove a record, returning whether one existed
    pub fn delete(&self, persona: &str, provider_id: &str) -> VaultResult<bool> {
        let removed = self.backend.delete(persona, provider_id)?;
        if removed {
            info!(persona, provider = provider_id, "deleted credentials");
            self.record(&AuditEntry::delete(persona, provider_id));
        }
        Ok(removed)
    }

    /// Run the backend self-test
    ///
    /// This rewrites the credential file; do not call it where a no-op write
    /// is undesirable.
    pub fn doctor(&self) -> DoctorReport {
        self.backend.doctor()
    }

    // The credential file is already replaced when this runs, so an audit
    // failure must not turn the operation into an error.
    fn record(&self, entry: &AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(entry) {
                warn!(path = %logger.path().display(), error = %e, "failed to write audit entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    fn audit_entries(temp_dir: &TempDir) -> Vec<AuditEntry> {
        let paths = VaultPaths::with_root(temp_dir.path().to_path_buf());
        AuditLogger::new(paths.audit_log()).read_all().unwrap()
    }

    fn open(temp_dir: &TempDir, passphrase: &str) -> CredentialStore {
        let paths = VaultPaths::with_root(temp_dir.path().to_path_buf());
        CredentialStore::open(&paths, Passphrase::new(passphrase).unwrap(), &Settings::default())
    }

    fn eqsl() -> CredentialRecord {
        CredentialRecord::new("KI7MT", "eqsl", [("username", "k"), ("password", "s")])
    }

    #[test]
    fn test_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir, "p1");

        store.put(eqsl()).unwrap();
        assert_eq!(store.get("KI7MT", "eqsl").unwrap(), Some(eqsl()));

        let report = store.doctor();
        assert!(report.ok, "{}", report);

        let reopened = open(&temp_dir, "wrong");
        assert!(reopened.get("KI7MT", "eqsl").unwrap_err().is_authentication());
    }

    #[test]
    fn test_missing_passphrase_opens_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_root(temp_dir.path().to_path_buf());

        let err = Passphrase::from_env_var("CREDVAULT_TEST_STORE_PASSPHRASE_UNSET")
            .map(|p| CredentialStore::open(&paths, p, &Settings::default()))
            .err()
            .unwrap();
        assert!(err.is_config());
        assert!(!paths.config_dir().exists());
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir, "p1");

        store.put(eqsl()).unwrap();
        assert!(!store.delete("KI7MT", "qrz").unwrap());
        assert!(store.delete("KI7MT", "eqsl").unwrap());
        store.list().unwrap();

        let history = audit_entries(&temp_dir);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].operation, Operation::Put);
        assert_eq!(history[0].fields, vec!["password", "username"]);
        assert_eq!(history[1].operation, Operation::Delete);

        let log = std::fs::read_to_string(temp_dir.path().join("config").join("audit.log")).unwrap();
        assert!(!log.contains("\"s\""));
    }

    #[test]
    fn test_audit_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_root(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let store = CredentialStore::open(&paths, Passphrase::new("p1").unwrap(), &settings);

        store.put(eqsl()).unwrap();
        assert!(audit_entries(&temp_dir).is_empty());
        assert!(!paths.audit_log().exists());
    }

    #[test]
    fn test_failed_put_is_not_audited() {
        let temp_dir = TempDir::new().unwrap();
        open(&temp_dir, "p1").put(eqsl()).unwrap();

        let wrong = open(&temp_dir, "wrong");
        assert!(wrong.put(eqsl()).is_err());
        assert_eq!(audit_entries(&temp_dir).len(), 1);
    }

    #[test]
    fn test_memory_backend_through_facade() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_root(temp_dir.path().to_path_buf());
        let store = CredentialStore::with_backend(Box::new(MemoryBackend::new()))
            .with_audit(AuditLogger::new(paths.audit_log()));

        store.put(eqsl()).unwrap();
        assert_eq!(store.list().unwrap(), vec![eqsl()]);
        assert!(store.doctor().ok);
        assert!(!paths.creds_file().exists());
        assert_eq!(audit_entries(&temp_dir).len(), 1);
    }
}
