//! Core data models for credvault

pub mod credential;
pub mod shape;

pub use credential::{CredentialKey, CredentialRecord};
pub use shape::CredentialShape;
