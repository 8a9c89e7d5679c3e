use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::providers::ecb::{BASE_CURRENCY, DEFAULT_SOURCE_URL};

const DEFAULT_FROM_CURRENCY: &str = "USD";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Location of the reference rate feed
    pub source_url: String,
    /// Source currency when none is given on the command line
    pub default_from: String,
    /// Target currency when none is given; falls back to the feed's base currency
    pub default_to: Option<String>,
    /// Decimal places of the converted amount; full precision when unset
    pub precision: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            default_from: DEFAULT_FROM_CURRENCY.to_string(),
            default_to: None,
            precision: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Loads the given file, or the default file when it exists, or falls back
    /// to built-in defaults.
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_path(path);
        }

        let default_path = Self::default_config_path()?;
        if default_path.exists() {
            Self::load()
        } else {
            debug!(
                "No config at {}, using built-in defaults",
                default_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("eu", "exrate", "exrate")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn target_currency(&self) -> &str {
        self.default_to.as_deref().unwrap_or(BASE_CURRENCY)
    }
}
