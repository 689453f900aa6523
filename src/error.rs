// Error taxonomy shared by every module of the library. The binary wraps
// these in `anyhow` for reporting; library callers can match on variants.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasteError {
    #[error("could not resolve the home directory")]
    HomeDirUnavailable,

    #[error("config not found at {}", path.display())]
    ConfigMissing { path: PathBuf },

    #[error("config file is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("you must provide either --file or --text")]
    MissingContent,

    #[error("--file and --text are mutually exclusive")]
    ConflictingContent,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid visibility `{0}`, must be 0, 1 or 2")]
    InvalidVisibility(String),

    #[error("invalid expiration `{0}`, expected one of N, 10M, 1H, 1D, 1W, 2W, 1M, 6M, 1Y")]
    InvalidExpiration(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upload failed: {0}")]
    UploadFailed(String),

    #[error("failed to fetch release: {0}")]
    UpdateFetchFailed(String),

    #[error("release manifest does not declare a version")]
    VersionUndeclared,

    #[error("release manifest does not declare a sha256 checksum, refusing to update")]
    IntegrityUnverifiable,

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, PasteError>;
