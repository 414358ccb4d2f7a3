//! Configuration module for credvault
//!
//! This module provides configuration management including:
//! - Store root resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::Settings;
