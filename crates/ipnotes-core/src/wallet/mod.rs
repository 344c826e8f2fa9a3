//! Wallet provider boundary.
//!
//! Only three calls cross this boundary: list accounts, request account
//! access, and `personal_sign` over the unlock message. Connection and
//! signing UI live in the provider, not here.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{NotesError, Result};

pub mod rpc;

pub use rpc::JsonRpcWallet;

/// An Ethereum wallet able to sign the unlock message.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts already authorized for this client (`eth_accounts`).
    async fn accounts(&self) -> Result<Vec<String>>;

    /// Ask the user to authorize an account (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<String>>;

    /// Sign `message` with `address` (`personal_sign`). Returns the hex signature.
    async fn personal_sign(&self, message: &str, address: &str) -> Result<String>;
}

/// Wallet backed by a signature produced out-of-band.
///
/// Useful with hardware or air-gapped wallets: sign
/// `"Unlock notes for <address>"` elsewhere and hand over the result.
pub struct PresignedWallet {
    address: String,
    signature: SecretString,
}

impl PresignedWallet {
    pub fn new(address: impl Into<String>, signature: SecretString) -> Self {
        Self {
            address: address.into(),
            signature,
        }
    }
}

#[async_trait]
impl WalletProvider for PresignedWallet {
    async fn accounts(&self) -> Result<Vec<String>> {
        Ok(vec![self.address.clone()])
    }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        self.accounts().await
    }

    async fn personal_sign(&self, _message: &str, address: &str) -> Result<String> {
        if !address.eq_ignore_ascii_case(&self.address) {
            return Err(NotesError::WalletRejected(format!(
                "No signature available for {}",
                address
            )));
        }
        Ok(self.signature.expose_secret().to_string())
    }
}
