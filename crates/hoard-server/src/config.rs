use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use hoard_gate::ValidatorConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Top-level configuration file layout.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HoardConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub validator: ValidatorConfig,
    pub auth: AuthConfig,
}

impl HoardConfig {
    /// Load from a TOML file. Missing sections and keys take their defaults.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest request body accepted at the transport. Must be above
    /// `validator.max_asset_size` for size rejections to be reported by the
    /// validator rather than the body limit.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 10061)),
            body_limit: 16 * 1024 * 1024,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Fs,
    Memory,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: BackendKind,
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Fs,
            root: PathBuf::from("dataStore/assets"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer token -> user name. When empty, tokens are trusted as names.
    pub tokens: HashMap<String, String>,
    pub allow_anonymous_upload: bool,
}
