//! User settings for credvault
//!
//! Non-secret preferences stored next to the credential file.

use serde::{Deserialize, Serialize};

use super::paths::VaultPaths;
use crate::error::{VaultError, VaultResult};
use crate::models::shape::{API_KEY, PASSWORD};
use crate::storage::file_io::{read_optional, write_atomic};

/// User settings for credvault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether put/delete operations are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Field names whose values are masked unless explicitly revealed
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

fn default_sensitive_fields() -> Vec<String> {
    vec![PASSWORD.to_string(), API_KEY.to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            audit_enabled: default_audit_enabled(),
            sensitive_fields: default_sensitive_fields(),
        }
    }
}

impl Settings {
    /// Whether a field's value should be masked on display
    pub fn is_sensitive(&self, field: &str) -> bool {
        self.sensitive_fields.iter().any(|f| f == field)
    }

    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_default(paths: &VaultPaths) -> VaultResult<Self> {
        match read_optional(paths.settings_file())? {
            Some(contents) => serde_json::from_str(&contents).map_err(|e| {
                VaultError::Config(format!("Failed to parse settings file: {}", e))
            }),
            // Don't save yet - let caller decide when to persist
            None => Ok(Self::default()),
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VaultPaths) -> VaultResult<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::Config(format!("Failed to serialize settings: {}", e)))?;
        write_atomic(paths.settings_file(), contents.as_bytes())
    }
}
