use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Token derived from `md5hex(request_time ++ api_key)`.
pub const TOKEN_MODE_TIME_KEY: &str = "time+key";
/// Token derived from `md5hex(request_time ++ md5hex(api_key))`. Default.
pub const TOKEN_MODE_TIME_MD5KEY: &str = "time+md5key";

fn default_timeout_seconds() -> u64 {
    10
}

fn default_verify_tls() -> bool {
    true
}

fn default_token_mode() -> String {
    TOKEN_MODE_TIME_MD5KEY.to_string()
}

/// Connection and auth settings for one panel. Immutable once loaded.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PanelConfig {
    pub base_url: String,
    /// Panel API key. Never logged.
    pub api_key: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    /// Signing variant, matched against the `TOKEN_MODE_*` constants at
    /// request time. Kept as a plain string so a misconfigured value fails
    /// with a clear message on first use instead of at parse time.
    #[serde(default = "default_token_mode")]
    pub token_mode: String,
}

impl PanelConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::home_dir()
            .context("No home directory")?
            .join(".panelbot");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Load from the default location, `~/.panelbot/config.json`.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_dir()?.join("config.json");
        Self::load_from(&config_path)
    }

    /// Load from an explicit path. Missing `base_url` or `api_key` fails
    /// here; `timeout_seconds`, `verify_tls` and `token_mode` fall back to
    /// their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Base URL with trailing slashes stripped; request paths carry the
    /// leading `/`.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
