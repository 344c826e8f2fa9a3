//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, note, reference).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Wallet unavailable, rejected, or notes still locked.
    pub const AUTH_FAILED: i32 = 5;

    /// Pinning upload or gateway fetch failed.
    pub const NETWORK_FAILED: i32 = 6;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    /// Bearer token for the pinning service.
    pub const PINNING_JWT: &str = "IPNOTES_PINNING_JWT";

    /// Signature over the unlock message, produced out-of-band.
    pub const SIGNATURE: &str = "IPNOTES_SIGNATURE";

    /// Config file override (also accepted as `--config`).
    pub const CONFIG: &str = "IPNOTES_CONFIG";

    /// Reference file override (also accepted as `--refs`).
    pub const REFS: &str = "IPNOTES_REFS";
}

/// Local JSON-RPC port most signers listen on.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "ipnotes=warn,ipnotes_core=warn,ipnotes_cli=warn";

/// Tracing filter used with `--verbose`.
pub const VERBOSE_LOG_FILTER: &str = "ipnotes=debug,ipnotes_core=debug,ipnotes_cli=debug";
