//! Client configuration.
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - `<config dir>/design-client/config.json`
//! - `DESIGN_API_URL`, `DESIGN_API_KEY`, `DESIGN_ASSEMBLY`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "design-client";
const CONFIG_FILE: &str = "config.json";

/// Default service root for local development.
pub const DEFAULT_URL: &str = "http://localhost:9090/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service root, including the organization segment.
    pub base_url: String,
    /// Sent as a bearer token when set.
    pub api_key: Option<String>,
    /// Assembly whose design is edited.
    pub assembly: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: None,
            assembly: None,
        }
    }
}

impl ClientConfig {
    /// Load the config file (if any), then apply environment overrides.
    /// Falls back to defaults when the file is unreadable.
    pub fn load() -> Self {
        let mut config = match get_config_path().and_then(|path| Self::from_file(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("DESIGN_API_URL") {
            self.base_url = url;
        }
        if let Some(key) = var("DESIGN_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(assembly) = var("DESIGN_ASSEMBLY") {
            self.assembly = Some(assembly);
        }
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
