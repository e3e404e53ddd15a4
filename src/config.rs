use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::explore::ExploreSettings;

pub const DEFAULT_CONFIG_PATH: &str = "heading-explorer.toml";
pub const DEFAULT_GPSD_ADDR: &str = "127.0.0.1:2947";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml_edit::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml_edit::ser::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// gpsd address, empty disables the receiver
    pub gpsd_addr: String,
    /// Log true-north headings using the World Magnetic Model.
    pub apply_declination: bool,
    pub explore: ExploreSettings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gpsd_addr: DEFAULT_GPSD_ADDR.to_owned(),
            apply_declination: true,
            explore: ExploreSettings::default(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Config, ConfigError> {
        Ok(toml_edit::de::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml_edit::ser::to_string_pretty(self)?)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn gpsd_addr(&self) -> Option<&str> {
        let addr = self.gpsd_addr.trim();
        (!addr.is_empty()).then_some(addr)
    }
}
