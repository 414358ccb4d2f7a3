//! Audit logger for append-only audit log
//!
//! Each entry is one JSON line, flushed as soon as it is written. The log is
//! owner-only like the credential file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{VaultError, VaultResult};
use crate::storage::file_io::{open_append, read_optional};

use super::entry::AuditEntry;

/// Appends entries to and reads them back from the audit log
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> VaultResult<()> {
        let line = serde_json::to_string(entry)?;
        let mut file = open_append(&self.log_path)?;
        writeln!(file, "{}", line)
            .and_then(|()| file.flush())
            .map_err(|e| {
                VaultError::Io(format!(
                    "Failed to append to {}: {}",
                    self.log_path.display(),
                    e
                ))
            })
    }

    /// All entries, oldest first; a missing log is empty
    pub fn read_all(&self) -> VaultResult<Vec<AuditEntry>> {
        let Some(contents) = read_optional(&self.log_path)? else {
            return Ok(Vec::new());
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| {
                    VaultError::Json(format!("Bad audit entry on line {}: {}", index + 1, e))
                })
            })
            .collect()
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> VaultResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let older = entries.len().saturating_sub(count);
        entries.drain(..older);
        Ok(entries)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::models::CredentialRecord;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("config").join("audit.log");
        let logger = AuditLogger::new(log_path);
        (logger, temp_dir)
    }

    fn put_entry(provider: &str) -> AuditEntry {
        AuditEntry::put(&CredentialRecord::new(
            "KI7MT",
            provider,
            [("username", "k")],
        ))
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();

        logger.log(&put_entry("eqsl")).unwrap();
        logger.log(&AuditEntry::delete("KI7MT", "eqsl")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Put);
        assert_eq!(entries[1].operation, Operation::Delete);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for provider in ["a", "b", "c", "d", "e"] {
            logger.log(&put_entry(provider)).unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].provider, "d");
        assert_eq!(recent[1].provider, "e");
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(!logger.path().exists());
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(10).unwrap().is_empty());
    }

    #[test]
    fn test_bad_line_reports_position() {
        let (logger, _temp) = create_test_logger();
        logger.log(&put_entry("eqsl")).unwrap();
        writeln!(open_append(logger.path()).unwrap(), "\n{{not json").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);
    }

    #[cfg(unix)]
    #[test]
    fn test_log_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (logger, _temp) = create_test_logger();
        logger.log(&put_entry("eqsl")).unwrap();

        let mode = std::fs::metadata(logger.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&put_entry("eqsl")).unwrap();

        let logger2 = AuditLogger::new(temp.path().join("config").join("audit.log"));
        assert_eq!(logger2.read_all().unwrap().len(), 1);
    }
}
