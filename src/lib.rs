//! credvault - encrypted local credential vault
//!
//! Stores opaque credential fields (username, password, API key) scoped by a
//! (persona, provider) pair in a single passphrase-encrypted file. There is
//! no server and no external key management.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: PBKDF2 key derivation, AES-256-GCM, CSPRNG, passphrase handling
//! - `models`: Credential records and typed credential shapes
//! - `storage`: Envelope/document codecs, atomic file I/O, backends and the
//!   `CredentialStore` facade
//! - `config`: Store root resolution and user settings
//! - `audit`: Append-only log of credential changes (no secret values)
//! - `display`: Terminal rendering with redaction of sensitive fields
//! - `cli`: Command handlers
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use credvault::config::{Settings, VaultPaths};
//! use credvault::crypto::Passphrase;
//! use credvault::models::CredentialRecord;
//! use credvault::storage::CredentialStore;
//!
//! let paths = VaultPaths::resolve(None)?;
//! let store = CredentialStore::open(&paths, Passphrase::new("p1")?, &Settings::default());
//! store.put(CredentialRecord::new("KI7MT", "eqsl", [("username", "k"), ("password", "s")]))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{VaultError, VaultResult};
