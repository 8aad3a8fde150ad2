//! snowgen settings types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory scanned for `<brand>.json` files when nothing else is configured
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Directory receiving one subdirectory per brand when nothing else is configured
pub const DEFAULT_OUTPUT_DIR: &str = "dbt_projects";

/// Main snowgen configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding brand config JSON files
    #[serde(rename = "config-dir")]
    pub config_dir: PathBuf,

    /// Base directory for generated dbt projects
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .snowgen.yml
        let local_config = PathBuf::from(".snowgen.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/snowgen/snowgen.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("snowgen").join("snowgen.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded settings from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = crate::yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
