//! Storage backend contract for credentials

use std::fmt;

use crate::error::VaultResult;
use crate::models::CredentialRecord;

/// Result of a backend self-test
///
/// Carries no secret material; `Display` gives the human-readable status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub ok: bool,
    pub backend: &'static str,
    pub detail: String,
}

impl DoctorReport {
    pub fn ok(backend: &'static str, detail: impl Into<String>) -> Self {
        Self {
            ok: true,
            backend,
            detail: detail.into(),
        }
    }

    pub fn failed(backend: &'static str, detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            backend,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ok {
            write!(f, "{} ok ({})", self.backend, self.detail)
        } else {
            write!(f, "{} error: {}", self.backend, self.detail)
        }
    }
}

/// CRUD operations over credential records keyed by (persona, provider)
pub trait StoreBackend: Send + Sync {
    /// Insert or replace the record with the same persona and provider
    fn put(&self, record: CredentialRecord) -> VaultResult<()>;

    /// Look up a record; absence is `Ok(None)`
    fn get(&self, persona: &str, provider_id: &str) -> VaultResult<Option<CredentialRecord>>;

    /// All records in stored order
    fn list(&self) -> VaultResult<Vec<CredentialRecord>>;

    /// Remove a record, returning whether one existed
    fn delete(&self, persona: &str, provider_id: &str) -> VaultResult<bool>;

    /// Basic self-test
    fn doctor(&self) -> DoctorReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let ok = DoctorReport::ok("PortableFileBackend", "/tmp/creds.enc.json");
        assert_eq!(ok.to_string(), "PortableFileBackend ok (/tmp/creds.enc.json)");

        let failed = DoctorReport::failed("PortableFileBackend", "permission denied");
        assert_eq!(failed.to_string(), "PortableFileBackend error: permission denied");
        assert!(!failed.ok);
    }
}
