use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const FILE_NAME: &str = "client.json";

/// Overrides the configured backend URL, highest precedence.
pub const API_URL_ENV: &str = "DATACHAT_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7377".to_string(),
            timeout_secs: 30,
        }
    }
}

fn config_path(dir: &Path) -> Result<PathBuf, ConfigError> {
    fs::create_dir_all(dir)?;
    Ok(dir.join(FILE_NAME))
}

pub fn load_config(dir: &Path) -> Result<ClientConfig, ConfigError> {
    let path = config_path(dir)?;

    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        ClientConfig::default()
    };

    Ok(apply_override(config, std::env::var(API_URL_ENV).ok()))
}

pub fn save_config(dir: &Path, config: &ClientConfig) -> Result<(), ConfigError> {
    let path = config_path(dir)?;
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

fn apply_override(mut config: ClientConfig, override_url: Option<String>) -> ClientConfig {
    if let Some(url) = override_url {
        if !url.trim().is_empty() {
            config.base_url = url;
        }
    }
    config
}
