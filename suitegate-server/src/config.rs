//! Gateway configuration file.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use suitegate_facade::FacadeConfig;
use suitegate_store::RestStoreConfig;
use tracing::info;

/// Which record store backs the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Process-local maps. Data is lost on exit.
    #[default]
    Memory,
    /// The ERP's REST record service.
    Rest,
}

/// Top-level `suitegate.toml`.
///
/// ```toml
/// port = 8080
/// store = "rest"
///
/// [rest]
/// account_id = "1234567_SB1"
/// access_token = "..."
///
/// [facade]
/// page_size = 100
/// approval_threshold = 5000.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub port: u16,
    pub store: StoreKind,
    pub rest: RestStoreConfig,
    pub facade: FacadeConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            store: StoreKind::Memory,
            rest: RestStoreConfig::default(),
            facade: FacadeConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid gateway config")
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }
}
