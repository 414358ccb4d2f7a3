//! Audit logging for credential mutations
//!
//! Every successful put or delete is appended to a line-delimited JSON log
//! (`<root>/config/audit.log`). Entries record who/what was touched and the
//! field names involved; field values and the passphrase are never written.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
