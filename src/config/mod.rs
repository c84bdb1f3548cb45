use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::ViewMode;

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

/// Settings for the generative content API
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GeminiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout; unset means wait for the transport to resolve
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Place name to geocode when no coordinates are given
    #[serde(default)]
    pub near: Option<String>,
    #[serde(default)]
    pub view: Option<ViewMode>,
    #[serde(default)]
    pub color: Option<bool>,
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

impl FileConfig {
    /// Load the first parseable config file from the standard search paths
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config file");
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file; any failure is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Coordinates are only usable when both halves are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("crowdscan.toml"));
    paths.push(PathBuf::from(".crowdscan.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("crowdscan").join("config.toml"));
        paths.push(config_dir.join("crowdscan.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".crowdscan.toml"));
        paths.push(home.join(".config").join("crowdscan").join("config.toml"));
    }

    paths
}
