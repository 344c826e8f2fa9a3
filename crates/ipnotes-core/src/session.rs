//! Wallet session: which account is connected and whether notes are unlocked.
//!
//! A session moves `Disconnected -> Locked -> Unlocked`. The key only exists
//! in the `Unlocked` state and is zeroized when the session is torn down.

use crate::crypto::{unlock_message, EncryptionKey};
use crate::error::{NotesError, Result};
use crate::wallet::WalletProvider;

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    /// Account known, no signature yet.
    Locked { account: String },
    Unlocked { account: String, key: EncryptionKey },
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to `wallet` and try to unlock.
    ///
    /// Account discovery failures are returned as errors. A signing failure
    /// is not: the session comes back `Locked` with the reason in
    /// [`Session::last_error`], and [`Session::unlock`] may be retried.
    pub async fn connect(wallet: &dyn WalletProvider, request_access: bool) -> Result<Self> {
        let mut accounts = wallet.accounts().await?;
        if accounts.is_empty() && request_access {
            tracing::debug!("no authorized accounts, requesting access");
            accounts = wallet.request_accounts().await?;
        }

        let account = accounts
            .into_iter()
            .next()
            .ok_or_else(|| NotesError::WalletRejected("No account authorized".to_string()))?;

        let mut session = Self {
            state: SessionState::Locked { account },
            last_error: None,
        };
        if let Err(err) = session.unlock(wallet).await {
            tracing::warn!(error = %err, "wallet did not sign the unlock message");
        }
        Ok(session)
    }

    /// Sign the unlock message for the connected account and derive the key.
    pub async fn unlock(&mut self, wallet: &dyn WalletProvider) -> Result<()> {
        let account = match &self.state {
            SessionState::Disconnected => {
                return Err(NotesError::WalletUnavailable(
                    "No wallet connected".to_string(),
                ))
            }
            SessionState::Unlocked { .. } => return Ok(()),
            SessionState::Locked { account } => account.clone(),
        };

        let derived = async {
            let signature = wallet
                .personal_sign(&unlock_message(&account), &account)
                .await?;
            EncryptionKey::from_signature(&signature)
        }
        .await;

        match derived {
            Ok(key) => {
                tracing::debug!(%account, "session unlocked");
                self.state = SessionState::Unlocked { account, key };
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn account(&self) -> Option<&str> {
        match &self.state {
            SessionState::Disconnected => None,
            SessionState::Locked { account } | SessionState::Unlocked { account, .. } => {
                Some(account)
            }
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, SessionState::Unlocked { .. })
    }

    /// The encryption key, if unlocked.
    pub fn key(&self) -> Result<&EncryptionKey> {
        match &self.state {
            SessionState::Unlocked { key, .. } => Ok(key),
            _ => Err(NotesError::Locked),
        }
    }

    /// Most recent unlock failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Forget the account and key.
    pub fn disconnect(&mut self) {
        self.state = SessionState::Disconnected;
        self.last_error = None;
    }
}
