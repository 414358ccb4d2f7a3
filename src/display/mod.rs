//! Display formatting for terminal output
//!
//! Rendering of credential records for the CLI. Redaction of sensitive field
//! values happens here, in the caller layer, not in the store.

pub mod credential;

pub use credential::{format_audit_entries, format_credential_details, format_credential_list};
