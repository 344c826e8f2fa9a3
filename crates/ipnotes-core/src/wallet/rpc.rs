//! JSON-RPC 2.0 wallet provider over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::WalletProvider;
use crate::error::{NotesError, Result};

/// EIP-1193 "user rejected the request".
const USER_REJECTED_CODE: i64 = 4001;

/// Signing waits on a human; allow it some time.
const RPC_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Wallet reached through a JSON-RPC endpoint (a local signer or node).
pub struct JsonRpcWallet {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcWallet {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .map_err(|e| NotesError::Config(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            client,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotesError::WalletUnavailable(format!("{}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotesError::WalletUnavailable(format!(
                "{} answered HTTP {}",
                self.url,
                status.as_u16()
            )));
        }

        let body: RpcResponse = response.json().await.map_err(|e| {
            NotesError::WalletUnavailable(format!("Invalid JSON-RPC response: {}", e))
        })?;

        if let Some(err) = body.error {
            tracing::debug!(method, code = err.code, "wallet returned an error");
            return Err(if err.code == USER_REJECTED_CODE {
                NotesError::WalletRejected("User rejected the request".to_string())
            } else {
                NotesError::WalletRejected(format!("{} (code {})", err.message, err.code))
            });
        }

        body.result.ok_or_else(|| {
            NotesError::WalletUnavailable("JSON-RPC response had no result".to_string())
        })
    }

    async fn call_accounts(&self, method: &str) -> Result<Vec<String>> {
        let result = self.call(method, Value::Array(Vec::new())).await?;
        serde_json::from_value(result)
            .map_err(|e| NotesError::WalletUnavailable(format!("Invalid account list: {}", e)))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn accounts(&self) -> Result<Vec<String>> {
        self.call_accounts("eth_accounts").await
    }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        self.call_accounts("eth_requestAccounts").await
    }

    async fn personal_sign(&self, message: &str, address: &str) -> Result<String> {
        let params = serde_json::json!([hex_message(message), address, ""]);
        let result = self.call("personal_sign", params).await?;
        match result {
            Value::String(signature) => Ok(signature),
            other => Err(NotesError::WalletUnavailable(format!(
                "Unexpected signature value: {}",
                other
            ))),
        }
    }
}

/// UTF-8 message as `0x`-prefixed hex, the form `personal_sign` expects.
pub fn hex_message(message: &str) -> String {
    format!("0x{}", hex::encode(message.as_bytes()))
}
