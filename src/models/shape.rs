//! Typed views over common credential shapes
//!
//! The store itself is shape-agnostic; these helpers are for callers that
//! need a username/password pair or a username/API key pair.

use std::fmt;

use super::credential::CredentialRecord;

/// Field name for the account username
pub const USERNAME: &str = "username";
/// Field name for the account password
pub const PASSWORD: &str = "password";
/// Field name for an API key
pub const API_KEY: &str = "api_key";

/// A recognised credential shape
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialShape {
    /// Username + password pair
    UserPass { username: String, password: String },
    /// Username + API key pair
    ApiKey { username: String, api_key: String },
}

impl CredentialShape {
    /// Detect the shape of a record
    ///
    /// A record carrying both a password and an API key is reported as
    /// `UserPass`.
    pub fn from_record(record: &CredentialRecord) -> Option<Self> {
        let username = record.get(USERNAME)?;
        if let Some(password) = record.get(PASSWORD) {
            return Some(Self::UserPass {
                username: username.to_string(),
                password: password.to_string(),
            });
        }
        record.get(API_KEY).map(|api_key| Self::ApiKey {
            username: username.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build a record with this shape's fields
    pub fn into_record(self, persona: impl Into<String>, provider_id: impl Into<String>) -> CredentialRecord {
        match self {
            Self::UserPass { username, password } => {
                CredentialRecord::new(persona, provider_id, [(USERNAME, username), (PASSWORD, password)])
            }
            Self::ApiKey { username, api_key } => {
                CredentialRecord::new(persona, provider_id, [(USERNAME, username), (API_KEY, api_key)])
            }
        }
    }

    /// Short label for the shape
    pub fn label(&self) -> &'static str {
        match self {
            Self::UserPass { .. } => "username+password",
            Self::ApiKey { .. } => "username+api_key",
        }
    }
}

impl fmt::Debug for CredentialShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialShape::{}", self.label())
    }
}
