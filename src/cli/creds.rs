//! Credential CLI commands
//!
//! Implements `set`, `get`, `list`, `delete`, `doctor` and `audit`.

use clap::Subcommand;

use crate::audit::AuditLogger;
use crate::config::{Settings, VaultPaths};
use crate::display::{format_audit_entries, format_credential_details, format_credential_list};
use crate::error::{VaultError, VaultResult};
use crate::models::shape::{API_KEY, PASSWORD, USERNAME};
use crate::models::CredentialRecord;
use crate::storage::CredentialStore;

/// Credential subcommands
#[derive(Subcommand)]
pub enum CredsCommands {
    /// Set credentials for a persona/provider (replaces any existing ones)
    Set {
        /// Persona (e.g. a callsign)
        persona: String,
        /// Provider id (e.g. eqsl, qrz)
        provider: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long = "api-key")]
        api_key: Option<String>,
        /// Additional field as NAME=VALUE (repeatable)
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
    /// Get credentials for a persona/provider
    Get {
        persona: String,
        provider: String,
        /// Show secret values
        #[arg(long)]
        show: bool,
    },
    /// List all stored persona/provider pairs
    List,
    /// Delete credentials for a persona/provider
    Delete { persona: String, provider: String },
    /// Check credential backend health (rewrites the credential file)
    Doctor,
    /// Show recent credential changes
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a credential command
pub fn handle_creds_command(
    paths: &VaultPaths,
    settings: &Settings,
    cmd: CredsCommands,
) -> VaultResult<()> {
    match cmd {
        CredsCommands::Set {
            persona,
            provider,
            username,
            password,
            api_key,
            fields,
        } => {
            let fields = collect_fields(username, password, api_key, fields)?;
            let store = CredentialStore::open_from_env(paths, settings)?;
            store.put(CredentialRecord::new(&persona, &provider, fields))?;
            println!("Saved credentials for {}/{}", persona, provider);
        }

        CredsCommands::Get {
            persona,
            provider,
            show,
        } => {
            let store = CredentialStore::open_from_env(paths, settings)?;
            match store.get(&persona, &provider)? {
                Some(record) => print!("{}", format_credential_details(&record, settings, show)),
                None => println!("No credentials found."),
            }
        }

        CredsCommands::List => {
            let store = CredentialStore::open_from_env(paths, settings)?;
            print!("{}", format_credential_list(&store.list()?));
        }

        CredsCommands::Delete { persona, provider } => {
            let store = CredentialStore::open_from_env(paths, settings)?;
            if store.delete(&persona, &provider)? {
                println!("Deleted.");
            } else {
                println!("Not found.");
            }
        }

        CredsCommands::Doctor => {
            let store = CredentialStore::open_from_env(paths, settings)?;
            let report = store.doctor();
            println!("{}", report);
            if !report.ok {
                return Err(VaultError::Storage(
                    "credential backend self-test failed".to_string(),
                ));
            }
        }

        CredsCommands::Audit { limit } => {
            let logger = AuditLogger::new(paths.audit_log());
            print!("{}", format_audit_entries(&logger.read_recent(limit)?));
        }
    }

    Ok(())
}

/// Build the field map from the named options and `--field NAME=VALUE` pairs
fn collect_fields(
    username: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
    extra: Vec<String>,
) -> VaultResult<Vec<(String, String)>> {
    let mut fields = Vec::new();
    for (name, value) in [(USERNAME, username), (PASSWORD, password), (API_KEY, api_key)] {
        if let Some(value) = value {
            fields.push((name.to_string(), value));
        }
    }

    for pair in extra {
        let (name, value) = pair.split_once('=').ok_or_else(|| {
            VaultError::Validation(format!("Expected NAME=VALUE, got '{}'", redact_pair(&pair)))
        })?;
        if name.trim().is_empty() {
            return Err(VaultError::Validation("Field name must not be empty".to_string()));
        }
        fields.push((name.trim().to_string(), value.to_string()));
    }

    if fields.is_empty() {
        return Err(VaultError::Validation(
            "Provide at least one of --username, --password, --api-key or --field".to_string(),
        ));
    }

    Ok(fields)
}

// A malformed pair may still be a secret; echo only its length.
fn redact_pair(pair: &str) -> String {
    format!("<{} chars>", pair.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_named_fields() {
        let fields = collect_fields(Some("k".into()), Some("s".into()), None, Vec::new()).unwrap();
        assert_eq!(
            fields,
            vec![
                ("username".to_string(), "k".to_string()),
                ("password".to_string(), "s".to_string())
            ]
        );
    }

    #[test]
    fn test_collect_extra_fields() {
        let fields = collect_fields(None, None, None, vec!["token=a=b".into()]).unwrap();
        assert_eq!(fields, vec![("token".to_string(), "a=b".to_string())]);
    }

    #[test]
    fn test_extra_field_overrides_named() {
        let record = CredentialRecord::new(
            "KI7MT",
            "eqsl",
            collect_fields(Some("k".into()), None, None, vec!["username=other".into()]).unwrap(),
        );
        assert_eq!(record.get("username"), Some("other"));
    }

    #[test]
    fn test_no_fields_rejected() {
        let err = collect_fields(None, None, None, Vec::new()).unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));
    }

    #[test]
    fn test_malformed_pair_not_echoed() {
        let err = collect_fields(None, None, None, vec!["hunter2".into()]).unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
    }
}
