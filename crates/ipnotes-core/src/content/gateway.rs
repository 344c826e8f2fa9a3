//! Gateway fetch with sequential fallback.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::validate_cid;
use crate::error::{NotesError, Result};
use crate::fallback::first_success;

/// Public gateways tried in this order when none are configured.
pub const DEFAULT_GATEWAYS: &[&str] = &[
    "https://gateway.pinata.cloud/ipfs/{cid}",
    "https://ipfs.io/ipfs/{cid}",
    "https://cloudflare-ipfs.com/ipfs/{cid}",
];

/// Upper bound on a single gateway attempt.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(15);

const CID_PLACEHOLDER: &str = "{cid}";

/// A gateway URL with a `{cid}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayTemplate(String);

impl GatewayTemplate {
    /// Parse a template such as `https://ipfs.io/ipfs/{cid}`.
    pub fn parse(template: &str) -> Result<Self> {
        let template = template.trim();
        if !(template.starts_with("https://") || template.starts_with("http://")) {
            return Err(NotesError::Config(format!(
                "Gateway must be an http(s) URL: {}",
                template
            )));
        }
        if !template.contains(CID_PLACEHOLDER) {
            return Err(NotesError::Config(format!(
                "Gateway template must contain {}: {}",
                CID_PLACEHOLDER, template
            )));
        }
        Ok(Self(template.to_string()))
    }

    /// The default gateway list.
    pub fn defaults() -> Vec<Self> {
        DEFAULT_GATEWAYS
            .iter()
            .map(|t| Self((*t).to_string()))
            .collect()
    }

    pub fn url_for(&self, cid: &str) -> String {
        self.0.replace(CID_PLACEHOLDER, cid)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GatewayTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),
}

/// Fetches content through an ordered list of gateways.
pub struct GatewayFetcher {
    client: reqwest::Client,
    gateways: Vec<GatewayTemplate>,
}

impl GatewayFetcher {
    /// Build a fetcher. `timeout` bounds each gateway attempt.
    pub fn new(gateways: Vec<GatewayTemplate>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotesError::Config(format!("HTTP client error: {}", e)))?;
        Ok(Self { client, gateways })
    }

    pub fn gateways(&self) -> &[GatewayTemplate] {
        &self.gateways
    }

    /// Fetch a CID, first successful gateway wins.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::AllGatewaysFailed` when every gateway errors,
    /// times out or answers with a non-success status.
    pub async fn fetch(&self, cid: &str) -> Result<String> {
        validate_cid(cid)?;
        let client = &self.client;

        let result = first_success(&self.gateways, |gateway| {
            let url = gateway.url_for(cid);
            async move {
                tracing::debug!(%url, "fetching from gateway");
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| GatewayError::Transport(e.to_string()))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(GatewayError::Status(status.as_u16()));
                }
                response
                    .text()
                    .await
                    .map_err(|e| GatewayError::Transport(e.to_string()))
            }
        })
        .await;

        result.map_err(|exhausted| NotesError::AllGatewaysFailed {
            cid: cid.to_string(),
            attempts: exhausted.attempts(),
        })
    }
}
