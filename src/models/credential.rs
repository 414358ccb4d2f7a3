//! Credential record model
//!
//! A record holds opaque string fields (username, password, api_key, ...)
//! scoped by a persona and a provider id. Records are immutable; updating a
//! credential means replacing the whole record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{VaultError, VaultResult};

/// Unique key of a credential record across the whole store
///
/// Matching is exact and case-sensitive. Callsign case-folding and similar
/// normalization is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialKey {
    pub persona: String,
    pub provider_id: String,
}

impl CredentialKey {
    /// Create a new key
    pub fn new(persona: impl Into<String>, provider_id: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            provider_id: provider_id.into(),
        }
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.persona, self.provider_id)
    }
}

/// Credential fields for one (persona, provider) pair
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    persona: String,

    #[serde(rename = "provider")]
    provider_id: String,

    fields: BTreeMap<String, String>,
}

impl CredentialRecord {
    /// Create a new credential record
    pub fn new<I, K, V>(persona: impl Into<String>, provider_id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            persona: persona.into(),
            provider_id: provider_id.into(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Persona/callsign scope (e.g. "KI7MT")
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Provider id (e.g. "eqsl", "qrz")
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// All fields, ordered by name
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// The unique key of this record
    pub fn key(&self) -> CredentialKey {
        CredentialKey::new(&self.persona, &self.provider_id)
    }

    /// Whether this record belongs to the given persona and provider
    pub fn matches(&self, persona: &str, provider_id: &str) -> bool {
        self.persona == persona && self.provider_id == provider_id
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Get a field value, failing if it is missing or blank
    pub fn require(&self, name: &str) -> VaultResult<&str> {
        match self.get(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(VaultError::Validation(format!(
                "Missing field '{}' for {}",
                name,
                self.key()
            ))),
        }
    }
}

// Field values are secrets; only names are printed.
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("persona", &self.persona)
            .field("provider_id", &self.provider_id)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eqsl() -> CredentialRecord {
        CredentialRecord::new("KI7MT", "eqsl", [("username", "k"), ("password", "s")])
    }

    #[test]
    fn test_new_record() {
        let record = eqsl();
        assert_eq!(record.persona(), "KI7MT");
        assert_eq!(record.provider_id(), "eqsl");
        assert_eq!(record.get("username"), Some("k"));
        assert_eq!(record.get("api_key"), None);
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        let record = eqsl();
        assert!(record.matches("KI7MT", "eqsl"));
        assert!(!record.matches("ki7mt", "eqsl"));
        assert!(!record.matches("KI7MT", "EQSL"));
    }

    #[test]
    fn test_key() {
        let key = eqsl().key();
        assert_eq!(key, CredentialKey::new("KI7MT", "eqsl"));
        assert_eq!(key.to_string(), "KI7MT/eqsl");
    }

    #[test]
    fn test_require() {
        let record = CredentialRecord::new("KI7MT", "lotw", [("username", "k"), ("password", " ")]);
        assert_eq!(record.require("username").unwrap(), "k");
        assert!(record.require("password").is_err());
        assert!(record.require("api_key").is_err());
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(eqsl()).unwrap();
        assert_eq!(json["persona"], "KI7MT");
        assert_eq!(json["provider"], "eqsl");
        assert_eq!(json["fields"]["password"], "s");
    }

    #[test]
    fn test_debug_hides_values() {
        let debug = format!("{:?}", eqsl());
        assert!(debug.contains("password"));
        assert!(!debug.contains("\"s\""));
    }
}
