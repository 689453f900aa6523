// Paste module: turns what the user asked for (a file or some text, plus
// optional overrides) into a fully resolved request and hands it to the
// API client.

use crate::api::PasteClient;
use crate::config::{Config, ConfigStore};
use crate::error::{PasteError, Result};
use std::path::PathBuf;
use tracing::info;

/// Where the paste body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    File(PathBuf),
    Text(String),
}

impl ContentSource {
    /// Exactly one of `file` and `text` must be given. Empty text counts as
    /// no text.
    pub fn resolve(file: Option<PathBuf>, text: Option<String>) -> Result<Self> {
        let text = text.filter(|t| !t.is_empty());
        match (file, text) {
            (Some(_), Some(_)) => Err(PasteError::ConflictingContent),
            (Some(path), None) => Ok(ContentSource::File(path)),
            (None, Some(text)) => Ok(ContentSource::Text(text)),
            (None, None) => Err(PasteError::MissingContent),
        }
    }

    /// Load the paste body; a file is read in full as UTF-8.
    pub fn read(&self) -> Result<String> {
        match self {
            ContentSource::File(path) => {
                if !path.exists() {
                    return Err(PasteError::FileNotFound(path.clone()));
                }
                Ok(std::fs::read_to_string(path)?)
            }
            ContentSource::Text(text) => Ok(text.clone()),
        }
    }
}

/// Per-call overrides. `None` falls back to the stored default.
#[derive(Debug, Clone, Default)]
pub struct PasteOptions {
    pub title: Option<String>,
    pub private: Option<u8>,
    pub expire: Option<String>,
}

/// A paste ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteRequest {
    pub content: String,
    pub title: String,
    pub visibility: u8,
    pub expiration: String,
}

impl PasteRequest {
    pub fn resolve(content: String, options: &PasteOptions, config: &Config) -> Self {
        PasteRequest {
            content,
            title: options.title.clone().unwrap_or_default(),
            visibility: options.private.unwrap_or(config.default_private),
            expiration: options
                .expire
                .clone()
                .unwrap_or_else(|| config.default_expire.clone()),
        }
    }
}

/// Reads the stored defaults and uploads one paste per call.
pub struct PasteUploader {
    store: ConfigStore,
    client: PasteClient,
}

impl PasteUploader {
    pub fn new(store: ConfigStore, client: PasteClient) -> Self {
        PasteUploader { store, client }
    }

    /// Upload and return the URL of the new paste.
    pub fn upload(&self, source: &ContentSource, options: &PasteOptions) -> Result<String> {
        let content = source.read()?;
        let config = self.store.load()?;
        let request = PasteRequest::resolve(content, options, &config);
        let url = self.client.create_paste(&config.api_dev_key, &request)?;
        info!(%url, "paste created");
        Ok(url)
    }
}
