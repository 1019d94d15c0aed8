/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed panel configuration (backend, polling, start page)
[POS]:    Configuration layer - runtime setup
[UPDATE]: When adding new configuration options
*/

use facility_tasks_adapter::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration for the facility panel
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PanelConfig {
    /// Backend connection settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Task polling settings
    #[serde(default)]
    pub polling: PollingConfig,
    /// Route the panel opens on
    #[serde(default = "default_start_path")]
    pub start_path: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            polling: PollingConfig::default(),
            start_path: default_start_path(),
        }
    }
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout; also bounds how long a submission can keep the wizard busy
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

/// How each scheduler tick refreshes the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollMode {
    /// Page/busy/sequence guarded replacement on every tick
    Guarded,
    /// Replace only when the list length or the first task changed
    ChangeDetect,
}

/// Task polling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_poll_mode")]
    pub mode: PollMode,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            mode: default_poll_mode(),
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_poll_mode() -> PollMode {
    PollMode::Guarded
}

fn default_start_path() -> String {
    "/".to_string()
}

impl PanelConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// `<config_dir>/facility-panel/config.yaml`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("facility-panel").join("config.yaml"))
    }
}
