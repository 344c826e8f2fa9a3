//! Content store: where note payloads live once saved.
//!
//! The `ContentStore` trait hides whether payloads go to IPFS (pinning
//! service + public gateways) or to memory. Implementations must return
//! fetched content byte-identical to what was uploaded.
//!
//! ## Backends
//!
//! | Backend                | Use Case                      |
//! |------------------------|-------------------------------|
//! | `IpfsStore`            | Pinning upload, gateway fetch |
//! | `InMemoryContentStore` | Tests and offline use         |

use async_trait::async_trait;

use crate::error::{NotesError, Result};

pub mod gateway;
pub mod memory;
pub mod pinning;

pub use gateway::{GatewayFetcher, GatewayTemplate, DEFAULT_GATEWAYS, DEFAULT_GATEWAY_TIMEOUT};
pub use memory::InMemoryContentStore;
pub use pinning::{PinningClient, DEFAULT_PINNING_ENDPOINT, DEFAULT_PINNING_TIMEOUT};

/// Upload and fetch of opaque text by content identifier.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store content, returning the identifier assigned to it.
    async fn upload(&self, content: &str) -> Result<String>;

    /// Fetch previously stored content by identifier.
    async fn fetch(&self, cid: &str) -> Result<String>;
}

#[async_trait]
impl<T: ContentStore + ?Sized> ContentStore for &T {
    async fn upload(&self, content: &str) -> Result<String> {
        (**self).upload(content).await
    }

    async fn fetch(&self, cid: &str) -> Result<String> {
        (**self).fetch(cid).await
    }
}

/// IPFS-backed store: uploads through a pinning service, fetches through
/// an ordered list of public gateways.
pub struct IpfsStore {
    pinning: Option<PinningClient>,
    gateways: GatewayFetcher,
}

impl IpfsStore {
    /// Create a store. Without a pinning client the store is read-only.
    pub fn new(pinning: Option<PinningClient>, gateways: GatewayFetcher) -> Self {
        Self { pinning, gateways }
    }

    /// Whether uploads are possible.
    pub fn can_upload(&self) -> bool {
        self.pinning.is_some()
    }

    pub fn gateways(&self) -> &GatewayFetcher {
        &self.gateways
    }
}

#[async_trait]
impl ContentStore for IpfsStore {
    async fn upload(&self, content: &str) -> Result<String> {
        let pinning = self.pinning.as_ref().ok_or_else(|| {
            NotesError::Config("No pinning token configured; uploads are disabled".to_string())
        })?;
        pinning.pin(content).await
    }

    async fn fetch(&self, cid: &str) -> Result<String> {
        self.gateways.fetch(cid).await
    }
}

/// Reject identifiers that cannot be a CID or would alter a gateway URL.
pub fn validate_cid(cid: &str) -> Result<()> {
    if cid.trim().is_empty() {
        return Err(NotesError::InvalidInput("CID cannot be empty".to_string()));
    }
    if cid
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%' | '\\'))
    {
        return Err(NotesError::InvalidInput(format!("Invalid CID: {}", cid)));
    }
    Ok(())
}
