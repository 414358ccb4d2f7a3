//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CredentialRecord;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Record was stored (created or replaced)
    Put,
    /// Record was removed
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Put => write!(f, "PUT"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    pub persona: String,

    pub provider: String,

    /// Names of the fields stored by a put
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl AuditEntry {
    /// Create an entry for a put operation
    pub fn put(record: &CredentialRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Put,
            persona: record.persona().to_string(),
            provider: record.provider_id().to_string(),
            fields: record.fields().keys().cloned().collect(),
        }
    }

    /// Create an entry for a delete operation
    pub fn delete(persona: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            persona: persona.into(),
            provider: provider.into(),
            fields: Vec::new(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}/{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.persona,
            self.provider
        );

        if !self.fields.is_empty() {
            output.push_str(&format!(" fields: {}", self.fields.join(", ")));
        }

        output
    }
}
