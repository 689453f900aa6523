// Config module: the single user configuration record and the store that
// persists it as JSON under the user's home directory.

use crate::error::{PasteError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the configuration record inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".pasteup_config.json";

/// Expiration tokens accepted by the paste API.
pub const EXPIRATIONS: &[&str] = &["N", "10M", "1H", "1D", "1W", "2W", "1M", "6M", "1Y"];

pub const DEFAULT_VISIBILITY: &str = "1";
pub const DEFAULT_EXPIRATION: &str = "N";

/// User defaults written by `init`. Field names are the on-disk JSON keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_dev_key: String,
    pub default_private: u8,
    pub default_expire: String,
}

/// Raw answers collected by `init`, before validation. Keeping them as
/// strings lets the prompt layer stay dumb: everything is checked here.
#[derive(Debug, Clone, Default)]
pub struct InitAnswers {
    pub api_key: String,
    pub visibility: String,
    pub expire: String,
}

impl InitAnswers {
    /// Turn prompt answers into a configuration record, or explain why not.
    pub fn validate(&self) -> Result<Config> {
        let api_dev_key = self.api_key.trim();
        if api_dev_key.is_empty() {
            return Err(PasteError::InvalidInput("API key must not be empty".into()));
        }

        let visibility = self.visibility.trim();
        let default_private: i64 = visibility
            .parse()
            .map_err(|_| PasteError::InvalidVisibility(visibility.to_string()))?;
        let default_private = parse_visibility(default_private)
            .ok_or_else(|| PasteError::InvalidVisibility(visibility.to_string()))?;

        let default_expire = self.expire.trim();
        if !is_valid_expiration(default_expire) {
            return Err(PasteError::InvalidExpiration(default_expire.to_string()));
        }

        Ok(Config {
            api_dev_key: api_dev_key.to_string(),
            default_private,
            default_expire: default_expire.to_string(),
        })
    }
}

fn parse_visibility(value: i64) -> Option<u8> {
    match value {
        0..=2 => Some(value as u8),
        _ => None,
    }
}

pub fn is_valid_expiration(token: &str) -> bool {
    EXPIRATIONS.contains(&token)
}

/// Reads and writes the configuration record at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    /// Store rooted at `~/.pasteup_config.json`.
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or(PasteError::HomeDirUnavailable)?;
        Ok(Self::new(home.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the record. The JSON is written to a sibling temp file and
    /// renamed over the target so a crash never leaves a truncated config.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec(config)?;
        let tmp = staging_path(&self.path);
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "config saved");
        Ok(())
    }

    /// Read the record. A missing file is never replaced by defaults.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Err(PasteError::ConfigMissing {
                path: self.path.clone(),
            });
        }
        debug!(path = %self.path.display(), "loading config");
        let data = std::fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
