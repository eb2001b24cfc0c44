//! User-level configuration for infogrid
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/infogrid/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::notice::DEFAULT_NOTICE_TTL;
use crate::predict::PredictorConfig;

pub const ENV_PREDICTOR_URL: &str = "INFOGRID_PREDICTOR_URL";
pub const ENV_PREDICTOR_TIMEOUT: &str = "INFOGRID_PREDICTOR_TIMEOUT_SECS";
pub const ENV_DEBOUNCE_MS: &str = "INFOGRID_DEBOUNCE_MS";

/// Reference debounce delay for live recomputation
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub predictor: PredictorSection,
    #[serde(default)]
    pub live: LiveSection,
    #[serde(default)]
    pub notices: NoticeSection,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct PredictorSection {
    /// Predictor service root (default: http://127.0.0.1:8000)
    pub url: Option<String>,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct LiveSection {
    /// Debounce delay in milliseconds (default: 400)
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct NoticeSection {
    /// How long a notice stays visible, in seconds (default: 5)
    pub ttl_secs: Option<u64>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/infogrid/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            match Self::from_file(&path) {
                Ok(user_config) => config.merge(user_config),
                Err(e) => warn!("Ignoring unreadable config {}: {:#}", path.display(), e),
            }
        }

        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config TOML")
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("infogrid").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.predictor.url.is_some() {
            self.predictor.url = other.predictor.url;
        }
        if other.predictor.timeout_secs.is_some() {
            self.predictor.timeout_secs = other.predictor.timeout_secs;
        }
        if other.live.debounce_ms.is_some() {
            self.live.debounce_ms = other.live.debounce_ms;
        }
        if other.notices.ttl_secs.is_some() {
            self.notices.ttl_secs = other.notices.ttl_secs;
        }
    }

    /// Environment variables override everything
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_PREDICTOR_URL) {
            self.predictor.url = Some(url);
        }
        if let Some(secs) = env_u64(ENV_PREDICTOR_TIMEOUT) {
            self.predictor.timeout_secs = Some(secs);
        }
        if let Some(ms) = env_u64(ENV_DEBOUNCE_MS) {
            self.live.debounce_ms = Some(ms);
        }
    }

    /// Settings for the HTTP predictor client
    pub fn predictor_config(&self) -> PredictorConfig {
        let defaults = PredictorConfig::default();
        PredictorConfig {
            base_url: self.predictor.url.clone().unwrap_or(defaults.base_url),
            timeout: self
                .predictor
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.live.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    pub fn notice_ttl(&self) -> Duration {
        self.notices
            .ttl_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_NOTICE_TTL)
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::write_example(&config_path)?;
        Ok(config_path)
    }

    /// Write the commented example config to `path` unless a file is already there
    pub fn write_example(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !path.exists() {
            let example = r#"# Infogrid User Configuration

[predictor]
# Root URL of the prediction service (env: INFOGRID_PREDICTOR_URL)
# url = "http://127.0.0.1:8000"
# timeout_secs = 30

[live]
# Delay before entropy is recomputed after an edit (env: INFOGRID_DEBOUNCE_MS)
# debounce_ms = 400

[notices]
# ttl_secs = 5
"#;
            std::fs::write(path, example)?;
        }
        Ok(())
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a whole number", key, raw);
            None
        }
    }
}
