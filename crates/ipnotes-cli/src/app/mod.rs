//! Application-level utilities for the ipnotes CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config and reference files
//! - Wallet selection and session unlock

mod context;
mod resolver;

// Re-export public API
pub use context::{AppContext, CliNoteStore};
pub use resolver::{missing_config_message, resolve_config_path};
