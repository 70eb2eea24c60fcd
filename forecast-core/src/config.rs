use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::normalize::ValidityRule;

pub const DEFAULT_BASE_URL: &str = "https://api.stormglass.io";
pub const DEFAULT_SOURCE: &str = "noaa";

/// Settings for the StormGlass point forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormGlassConfig {
    /// Scheme and host, without the `/v2/...` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent verbatim as the `Authorization` header.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Preferred data source, e.g. "noaa" or "sg".
    #[serde(default = "default_source")]
    pub source: String,

    /// Unix timestamp sent as `end`; omitted from the request when unset.
    #[serde(default)]
    pub end: Option<i64>,

    #[serde(default)]
    pub validity: ValidityRule,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

impl Default for StormGlassConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            source: default_source(),
            end: None,
            validity: ValidityRule::default(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [stormglass]
/// api_token = "..."
/// source = "noaa"
/// validity = "present"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stormglass: StormGlassConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "marine-forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_token(&mut self, token: String) {
        self.stormglass.api_token = Some(token);
    }

    /// Returns the API token, if one is set and non-blank.
    pub fn api_token(&self) -> Option<&str> {
        self.stormglass
            .api_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    pub fn stormglass_config(&self) -> &StormGlassConfig {
        &self.stormglass
    }
}
