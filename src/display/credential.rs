//! Credential display formatting

use crate::audit::AuditEntry;
use crate::config::Settings;
use crate::models::{CredentialRecord, CredentialShape};

/// Placeholder printed instead of a sensitive value
pub const MASK: &str = "****";

/// Format a single record, masking sensitive fields unless `reveal` is set
pub fn format_credential_details(record: &CredentialRecord, settings: &Settings, reveal: bool) -> String {
    let mut output = format!("persona={} provider={}", record.persona(), record.provider_id());
    if let Some(shape) = CredentialShape::from_record(record) {
        output.push_str(&format!(" ({})", shape.label()));
    }
    output.push('\n');

    for (name, value) in record.fields() {
        let shown = if !reveal && settings.is_sensitive(name) {
            MASK
        } else {
            value.as_str()
        };
        output.push_str(&format!("  {}={}\n", name, shown));
    }

    output
}

/// Format a list of records as a table of keys and field names
///
/// Field values are never shown in the list view.
pub fn format_credential_list(records: &[CredentialRecord]) -> String {
    if records.is_empty() {
        return "(none)\n".to_string();
    }

    let persona_width = records
        .iter()
        .map(|r| r.persona().len())
        .max()
        .unwrap_or(7)
        .max(7);

    let provider_width = records
        .iter()
        .map(|r| r.provider_id().len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<persona_width$}  {:<provider_width$}  {}\n",
        "Persona",
        "Provider",
        "Fields",
        persona_width = persona_width,
        provider_width = provider_width,
    ));

    output.push_str(&format!(
        "{:-<persona_width$}  {:-<provider_width$}  {:-<6}\n",
        "",
        "",
        "",
        persona_width = persona_width,
        provider_width = provider_width,
    ));

    for record in records {
        let fields: Vec<&str> = record.fields().keys().map(String::as_str).collect();
        output.push_str(&format!(
            "{:<persona_width$}  {:<provider_width$}  {}\n",
            record.persona(),
            record.provider_id(),
            fields.join(", "),
            persona_width = persona_width,
            provider_width = provider_width,
        ));
    }

    output.push_str(&format!("\nTotal: {} credentials\n", records.len()));
    output
}

/// Format audit entries, one per line
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries.\n".to_string();
    }

    entries
        .iter()
        .map(|e| format!("{}\n", e.format_human_readable()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eqsl() -> CredentialRecord {
        CredentialRecord::new("KI7MT", "eqsl", [("username", "k"), ("password", "hunter2")])
    }

    #[test]
    fn test_details_masks_sensitive_fields() {
        let output = format_credential_details(&eqsl(), &Settings::default(), false);
        assert!(output.starts_with("persona=KI7MT provider=eqsl (username+password)\n"));
        assert!(output.contains("  username=k\n"));
        assert!(output.contains("  password=****\n"));
        assert!(!output.contains("hunter2"));
    }

    #[test]
    fn test_details_reveal() {
        let output = format_credential_details(&eqsl(), &Settings::default(), true);
        assert!(output.contains("  password=hunter2\n"));
    }

    #[test]
    fn test_details_custom_sensitive_fields() {
        let settings = Settings {
            sensitive_fields: vec!["username".to_string()],
            ..Settings::default()
        };
        let output = format_credential_details(&eqsl(), &settings, false);
        assert!(output.contains("  username=****\n"));
        assert!(output.contains("  password=hunter2\n"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_credential_list(&[]), "(none)\n");
    }

    #[test]
    fn test_list_hides_values() {
        let records = vec![
            eqsl(),
            CredentialRecord::new("W1AW", "clublog", [("api_key", "abc123")]),
        ];
        let output = format_credential_list(&records);

        assert!(output.contains("KI7MT"));
        assert!(output.contains("clublog"));
        assert!(output.contains("password, username"));
        assert!(output.contains("Total: 2 credentials"));
        assert!(!output.contains("hunter2"));
        assert!(!output.contains("abc123"));
    }

    #[test]
    fn test_audit_entries() {
        assert_eq!(format_audit_entries(&[]), "No audit entries.\n");

        let output = format_audit_entries(&[AuditEntry::delete("KI7MT", "eqsl")]);
        assert!(output.contains("DELETE KI7MT/eqsl"));
    }
}
