//! Path resolution for the config and reference files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::default_config_path;

/// Resolve the config file path (`--config`, `IPNOTES_CONFIG`, then XDG).
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(value) = cli.config.as_deref() {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Message shown when no config file exists.
pub fn missing_config_message(config_path: &Path) -> String {
    format!(
        "Config file not found: {}\n\nRun:\n  ipnotes init\n\nOr set IPNOTES_CONFIG to specify a different config location.",
        config_path.display()
    )
}
