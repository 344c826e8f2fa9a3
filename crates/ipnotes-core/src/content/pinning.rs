//! Pinning service upload (`POST /pinning/pinFileToIPFS`).

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{NotesError, Result};

/// Hosted pinning API used when none is configured.
pub const DEFAULT_PINNING_ENDPOINT: &str = "https://api.pinata.cloud";

/// Upper bound for one upload, connect through response body.
pub const DEFAULT_PINNING_TIMEOUT: Duration = Duration::from_secs(60);

const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Client for a single pinning endpoint authenticated with a bearer token.
pub struct PinningClient {
    client: reqwest::Client,
    endpoint: String,
    token: SecretString,
}

impl PinningClient {
    pub fn new(endpoint: &str, token: SecretString) -> Result<Self> {
        Self::with_timeout(endpoint, token, DEFAULT_PINNING_TIMEOUT)
    }

    /// Build a client whose uploads give up after `timeout`.
    pub fn with_timeout(endpoint: &str, token: SecretString, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotesError::Config(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn pin_url(&self) -> String {
        format!("{}{}", self.endpoint, PIN_FILE_PATH)
    }

    /// Upload JSON content as the multipart field `file`.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::UploadFailed` with the response body when the
    /// service answers with a non-success status or without `IpfsHash`.
    pub async fn pin(&self, content: &str) -> Result<String> {
        let part = Part::text(content.to_string())
            .file_name("note.json")
            .mime_str("application/json")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.pin_url())
            .bearer_auth(self.token.expose_secret())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotesError::UploadFailed {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: PinResponse =
            serde_json::from_str(&body).map_err(|_| NotesError::UploadFailed {
                status: status.as_u16(),
                body,
            })?;

        tracing::debug!(cid = %parsed.ipfs_hash, "pinned note payload");
        Ok(parsed.ipfs_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_url_joins_endpoint() {
        let client =
            PinningClient::new("https://api.example.com/", SecretString::from("t".to_string()))
                .unwrap();
        assert_eq!(
            client.pin_url(),
            "https://api.example.com/pinning/pinFileToIPFS"
        );
    }
}
