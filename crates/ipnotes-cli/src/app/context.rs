//! Application context for the ipnotes CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config and builds the
//! wallet, content store and note store from them.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use secrecy::SecretString;

use ipnotes_core::content::{GatewayFetcher, IpfsStore, PinningClient};
use ipnotes_core::store::JsonFileRefStore;
use ipnotes_core::wallet::{JsonRpcWallet, PresignedWallet};
use ipnotes_core::{NoteStore, NotesError, Session, WalletProvider};

use crate::cli::Cli;
use crate::config::{default_refs_path, read_config, NotesConfig};
use crate::constants::env_vars;
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::resolve_config_path;

/// Note store as wired by the CLI.
pub type CliNoteStore = NoteStore<IpfsStore, JsonFileRefStore>;

/// Config plus where it came from.
pub struct LoadedConfig {
    pub path: PathBuf,
    /// False when no file exists and defaults are in use.
    pub from_file: bool,
    pub config: NotesConfig,
}

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<LoadedConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// UI context for a command.
    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color)
    }

    /// The config, loading it lazily.
    ///
    /// A missing default file means defaults; a missing file named with
    /// `--config` or `IPNOTES_CONFIG` is an error.
    pub fn config(&self) -> anyhow::Result<&LoadedConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path(self.cli)?;
            if path.exists() {
                let config = read_config(&path)?;
                return Ok(LoadedConfig {
                    path,
                    from_file: true,
                    config,
                });
            }
            if self.cli.config.as_deref().is_some_and(|p| !p.trim().is_empty()) {
                return Err(CliError::not_found(
                    format!("Config file not found: {}", path.display()),
                    "Create it with `ipnotes --config <path> init` or unset IPNOTES_CONFIG",
                )
                .into());
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            let config = NotesConfig::new(default_refs_path()?, None, None, None, Vec::new(), None);
            Ok(LoadedConfig {
                path,
                from_file: false,
                config,
            })
        })
    }

    /// Reference file path (`--refs`, `IPNOTES_REFS`, then config).
    pub fn refs_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.refs.as_deref() {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(PathBuf::from(&self.config()?.config.notes.refs_path))
    }

    /// Pinning token from the environment, if set.
    pub fn pinning_token(&self) -> Option<SecretString> {
        std::env::var(env_vars::PINNING_JWT)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(SecretString::from)
    }

    /// IPFS content store from config; read-only without a pinning token.
    pub fn content_store(&self) -> anyhow::Result<IpfsStore> {
        let config = &self.config()?.config;
        let gateways = GatewayFetcher::new(config.gateways.templates()?, config.gateways.timeout())?;
        let pinning = self
            .pinning_token()
            .map(|token| PinningClient::new(&config.pinning.endpoint, token))
            .transpose()?;
        Ok(IpfsStore::new(pinning, gateways))
    }

    /// Open the note store over the reference file.
    pub fn open_store(&self) -> anyhow::Result<CliNoteStore> {
        let refs_path = self.refs_path()?;
        let refs = JsonFileRefStore::new(&refs_path);
        NoteStore::open(self.content_store()?, refs).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read reference file {}: {}",
                refs_path.display(),
                e
            )
        })
    }

    /// The wallet to unlock with.
    ///
    /// A signature in `IPNOTES_SIGNATURE` selects the out-of-band wallet
    /// (and requires `[wallet] address`); otherwise the JSON-RPC endpoint.
    pub fn wallet(&self) -> anyhow::Result<Box<dyn WalletProvider>> {
        let wallet = &self.config()?.config.wallet;
        if let Ok(signature) = std::env::var(env_vars::SIGNATURE) {
            if !signature.trim().is_empty() {
                let address = wallet.address.clone().ok_or_else(|| {
                    CliError::invalid_input(format!(
                        "{} is set but no wallet address is configured\nHint: Run `ipnotes init --address <0x...>`",
                        env_vars::SIGNATURE
                    ))
                })?;
                tracing::debug!(%address, "using presigned wallet");
                return Ok(Box::new(PresignedWallet::new(
                    address,
                    SecretString::from(signature),
                )));
            }
        }
        tracing::debug!(url = %wallet.rpc_url, "using JSON-RPC wallet");
        Ok(Box::new(JsonRpcWallet::new(&wallet.rpc_url)?))
    }

    /// Connect to the wallet and unlock, or fail with a wallet error.
    pub async fn unlock(&self, no_input: bool) -> anyhow::Result<Session> {
        let wallet = self.wallet()?;
        let rpc_url = self.config()?.config.wallet.rpc_url.clone();

        let session = Session::connect(wallet.as_ref(), !no_input)
            .await
            .map_err(|err| match err {
                NotesError::WalletUnavailable(reason) => anyhow::Error::new(
                    CliError::auth_failed_with_hint(
                        format!("Wallet unavailable: {}", reason),
                        format!(
                            "Start a JSON-RPC signer at {} or set {}",
                            rpc_url,
                            env_vars::SIGNATURE
                        ),
                    ),
                ),
                other => anyhow::Error::new(other),
            })?;

        if !session.is_unlocked() {
            let reason = session
                .last_error()
                .unwrap_or("the unlock message was not signed")
                .to_string();
            return Err(CliError::auth_failed_with_hint(
                format!("Notes are locked: {}", reason),
                "Approve the signature request in your wallet and try again",
            )
            .into());
        }
        Ok(session)
    }
}
