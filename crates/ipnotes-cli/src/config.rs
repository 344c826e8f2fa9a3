use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use ipnotes_core::content::{
    GatewayTemplate, DEFAULT_GATEWAYS, DEFAULT_GATEWAY_TIMEOUT, DEFAULT_PINNING_ENDPOINT,
};
use ipnotes_core::store::REFS_FILE_NAME;

use crate::constants::DEFAULT_RPC_URL;

#[derive(Debug, Serialize, Deserialize)]
pub struct NotesConfig {
    pub notes: NotesSection,
    #[serde(default)]
    pub wallet: WalletSection,
    #[serde(default)]
    pub pinning: PinningSection,
    #[serde(default)]
    pub gateways: GatewaysSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotesSection {
    pub refs_path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WalletSection {
    pub rpc_url: String,
    pub address: Option<String>,
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            address: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PinningSection {
    pub endpoint: String,
}

impl Default for PinningSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PINNING_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GatewaysSection {
    pub urls: Vec<String>,
    pub timeout_seconds: u64,
}

impl Default for GatewaysSection {
    fn default() -> Self {
        Self {
            urls: DEFAULT_GATEWAYS.iter().map(|g| g.to_string()).collect(),
            timeout_seconds: DEFAULT_GATEWAY_TIMEOUT.as_secs(),
        }
    }
}

impl GatewaysSection {
    /// Parsed gateway templates, in configured order.
    pub fn templates(&self) -> anyhow::Result<Vec<GatewayTemplate>> {
        if self.urls.is_empty() {
            return Err(anyhow::anyhow!("[gateways] urls must list at least one gateway"));
        }
        self.urls
            .iter()
            .map(|url| GatewayTemplate::parse(url).map_err(anyhow::Error::from))
            .collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}

impl NotesConfig {
    pub fn new(
        refs_path: PathBuf,
        rpc_url: Option<String>,
        address: Option<String>,
        pinning_endpoint: Option<String>,
        gateways: Vec<String>,
        gateway_timeout_seconds: Option<u64>,
    ) -> Self {
        let defaults = GatewaysSection::default();
        Self {
            notes: NotesSection {
                refs_path: refs_path.to_string_lossy().to_string(),
            },
            wallet: WalletSection {
                rpc_url: rpc_url.unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
                address,
            },
            pinning: PinningSection {
                endpoint: pinning_endpoint.unwrap_or_else(|| DEFAULT_PINNING_ENDPOINT.to_string()),
            },
            gateways: GatewaysSection {
                urls: if gateways.is_empty() {
                    defaults.urls
                } else {
                    gateways
                },
                timeout_seconds: gateway_timeout_seconds.unwrap_or(defaults.timeout_seconds),
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_refs_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(REFS_FILE_NAME))
}

pub fn read_config(path: &Path) -> anyhow::Result<NotesConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &NotesConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("ipnotes"));
        }
    }
    Ok(home_dir()?.join(".config").join("ipnotes"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("ipnotes"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("ipnotes"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
