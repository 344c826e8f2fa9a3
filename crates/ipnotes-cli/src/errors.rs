//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI. Core errors that
//! reach `main` untyped are classified by [`exit_code_for`].

use std::fmt;

use ipnotes_core::NotesError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, note reference)
    NotFound { message: String, hint: String },

    /// Wallet could not unlock the notes
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Pinning service or gateways failed
    Network { message: String, hint: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } | CliError::Network { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create a Network error with message and hint.
    pub fn network(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::Network {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Network { .. } => exit_codes::NETWORK_FAILED,
        }
    }
}

/// Exit code for an error returned from a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<NotesError>() {
        Some(core) if core.is_wallet_error() => exit_codes::AUTH_FAILED,
        Some(core) if core.is_network_error() => exit_codes::NETWORK_FAILED,
        Some(NotesError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(NotesError::InvalidInput(_)) => exit_codes::INVALID_INPUT,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_exit_codes() {
        assert_eq!(CliError::not_found("x", "y").exit_code(), 3);
        assert_eq!(CliError::invalid_input("x").exit_code(), 4);
        assert_eq!(CliError::auth_failed_with_hint("x", "y").exit_code(), 5);
        assert_eq!(CliError::network("x", "y").exit_code(), 6);
    }

    #[test]
    fn test_core_errors_are_classified() {
        let rejected = anyhow::Error::new(NotesError::WalletRejected("no".into()));
        assert_eq!(exit_code_for(&rejected), exit_codes::AUTH_FAILED);

        let upload = anyhow::Error::new(NotesError::UploadFailed {
            status: 401,
            body: String::new(),
        });
        assert_eq!(exit_code_for(&upload), exit_codes::NETWORK_FAILED);

        let other = anyhow::anyhow!("boom");
        assert_eq!(exit_code_for(&other), 1);
    }

    #[test]
    fn test_display_includes_hint() {
        let err = CliError::not_found("Config file not found", "Run `ipnotes init`");
        assert_eq!(err.to_string(), "Config file not found\nRun `ipnotes init`");
    }
}
