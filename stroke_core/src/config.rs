//! Site configuration file support for StrokeTriage.
//!
//! Configuration is loaded from
//! `$XDG_CONFIG_HOME/stroketriage/config.toml`. It carries the site's
//! transport logistics and specialist contact line; the rules evaluator
//! itself never reads configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logistics: LogisticsConfig,

    /// Telestroke/specialist contact shown by the CLI
    #[serde(default)]
    pub specialist_line: Option<String>,
}

/// Site transport logistics used to fill case files that omit them
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogisticsConfig {
    #[serde(default = "default_dido_minutes")]
    pub dido_minutes: u32,

    #[serde(default = "default_transport_minutes")]
    pub transport_minutes: u32,

    #[serde(default = "default_receiving_dtn_minutes")]
    pub receiving_dtn_minutes: u32,

    #[serde(default = "default_spoke_mode")]
    pub spoke_mode: bool,
}

impl Default for LogisticsConfig {
    fn default() -> Self {
        Self {
            dido_minutes: default_dido_minutes(),
            transport_minutes: default_transport_minutes(),
            receiving_dtn_minutes: default_receiving_dtn_minutes(),
            spoke_mode: default_spoke_mode(),
        }
    }
}

// Default value functions
fn default_dido_minutes() -> u32 {
    120
}

fn default_transport_minutes() -> u32 {
    20
}

fn default_receiving_dtn_minutes() -> u32 {
    45
}

fn default_spoke_mode() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("stroketriage").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
