//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the credential store.

pub mod creds;

pub use creds::{handle_creds_command, CredsCommands};
