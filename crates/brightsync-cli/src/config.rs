//! Persistent CLI configuration: API clients and sync settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use brightsync_core::sync::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_BACKOFF_MS};
use brightsync_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";
const APP_DIR: &str = "brightsync";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub active_client: Option<String>,
    #[serde(default)]
    pub clients: BTreeMap<String, ApiClientConfig>,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default)]
    pub sync: SyncSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Brightcove id of the player `_none` defers to
    #[serde(default)]
    pub default_player: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

const fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

const fn default_retry_backoff_ms() -> u64 {
    DEFAULT_RETRY_BACKOFF_MS
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE_NAME)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("brightsync.db")
}

pub fn normalize_client_name(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Client named on the command line, then `BRIGHTSYNC_CLIENT`, then the active one
    pub fn resolve_client_name(&self, explicit: Option<&str>) -> Option<String> {
        normalize_client_name(explicit)
            .or_else(|| normalize_client_name(std::env::var("BRIGHTSYNC_CLIENT").ok().as_deref()))
            .or_else(|| normalize_client_name(self.active_client.as_deref()))
    }

    /// Database path from the command line, then `BRIGHTSYNC_DB_PATH`, then the config file
    pub fn resolve_db_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| std::env::var_os("BRIGHTSYNC_DB_PATH").map(PathBuf::from))
            .or_else(|| self.db_path.clone())
            .unwrap_or_else(default_db_path)
    }

    pub fn client(&self, name: &str) -> Option<&ApiClientConfig> {
        self.clients.get(name)
    }

    /// Default player configured for the named client
    pub fn default_player(&self, client_name: &str) -> Option<String> {
        self.client(client_name)?.default_player.clone()
    }

    pub fn client_mut_or_default(&mut self, name: &str) -> &mut ApiClientConfig {
        self.clients.entry(name.to_string()).or_default()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.sync.max_attempts.max(1),
            backoff_ms: self.sync.retry_backoff_ms,
        }
    }

    fn normalize(&mut self) {
        self.active_client = normalize_client_name(self.active_client.as_deref());
        self.sync.max_attempts = self.sync.max_attempts.max(1);
        for client in self.clients.values_mut() {
            client.normalize();
        }
    }
}

impl ApiClientConfig {
    fn normalize(&mut self) {
        self.default_player = normalize_text_option(self.default_player.take());
    }
}
