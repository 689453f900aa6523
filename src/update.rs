// Self-update: read the release manifest, and if it announces a different
// version, download the artifact, check it against the manifest's SHA-256,
// stage it next to the executable and rename it into place. The running
// process keeps the old code until it is restarted.

use crate::error::{PasteError, Result};
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const VERSION_MARKER: &str = "version";
const CHECKSUM_MARKER: &str = "sha256";

/// What the release manifest declares. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseManifest {
    pub version: Option<String>,
    pub sha256: Option<String>,
}

impl ReleaseManifest {
    /// Each value is the quoted text after `=` on the first line that starts
    /// with its marker.
    pub fn parse(text: &str) -> Self {
        ReleaseManifest {
            version: declared_value(text, VERSION_MARKER),
            sha256: declared_value(text, CHECKSUM_MARKER),
        }
    }
}

fn declared_value(text: &str, marker: &str) -> Option<String> {
    let line = text.lines().find(|line| line.starts_with(marker))?;
    let (_, value) = line.split_once('=')?;
    let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
    Some(value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate {
        version: String,
    },
    Updated {
        from: String,
        to: String,
        backup: PathBuf,
    },
}

pub struct UpdateChecker {
    client: Client,
    manifest_url: String,
    artifact_url: String,
    target: PathBuf,
}

impl UpdateChecker {
    /// `target` is the file replaced on update, normally the running
    /// executable.
    pub fn new(
        client: Client,
        manifest_url: impl Into<String>,
        artifact_url: impl Into<String>,
        target: impl Into<PathBuf>,
    ) -> Self {
        UpdateChecker {
            client,
            manifest_url: manifest_url.into(),
            artifact_url: artifact_url.into(),
            target: target.into(),
        }
    }

    pub fn fetch_manifest(&self) -> Result<ReleaseManifest> {
        let text = String::from_utf8_lossy(&self.get(&self.manifest_url)?).into_owned();
        Ok(ReleaseManifest::parse(&text))
    }

    /// `Ok(None)` means the manifest was fetched but declares no version.
    pub fn fetch_latest_version(&self) -> Result<Option<String>> {
        Ok(self.fetch_manifest()?.version)
    }

    /// Compare against `current` (exact string match) and replace the target
    /// when the manifest announces something else.
    pub fn check_and_update(&self, current: &str) -> Result<UpdateOutcome> {
        let manifest = self.fetch_manifest()?;
        let latest = manifest.version.ok_or(PasteError::VersionUndeclared)?;
        if latest == current {
            debug!(version = %current, "already up to date");
            return Ok(UpdateOutcome::UpToDate { version: latest });
        }
        let expected = manifest.sha256.ok_or(PasteError::IntegrityUnverifiable)?;
        info!(from = %current, to = %latest, "downloading new release");

        let bytes = self.get(&self.artifact_url)?;
        verify_checksum(&bytes, &expected)?;

        let backup = self.install(&bytes)?;
        info!(path = %self.target.display(), "executable replaced");
        Ok(UpdateOutcome::Updated {
            from: current.to_string(),
            to: latest,
            backup,
        })
    }

    /// Stage, back up, then atomically swap. Returns the backup path.
    fn install(&self, bytes: &[u8]) -> Result<PathBuf> {
        let staging = sibling_with_suffix(&self.target, "new");
        let backup = sibling_with_suffix(&self.target, "bak");

        let permissions = std::fs::metadata(&self.target)?.permissions();
        if let Err(err) = std::fs::write(&staging, bytes)
            .and_then(|_| std::fs::set_permissions(&staging, permissions))
            .and_then(|_| std::fs::copy(&self.target, &backup).map(|_| ()))
            .and_then(|_| std::fs::rename(&staging, &self.target))
        {
            let _ = std::fs::remove_file(&staging);
            return Err(err.into());
        }
        Ok(backup)
    }

    fn get(&self, url: &str) -> Result<Vec<u8>> {
        debug!(%url, "fetching");
        let res = self
            .client
            .get(url)
            .send()
            .map_err(|e| PasteError::UpdateFetchFailed(e.to_string()))?;
        let status = res.status();
        if !status.is_success() {
            warn!(%url, %status, "release fetch failed");
            return Err(PasteError::UpdateFetchFailed(format!("{} returned {}", url, status)));
        }
        let bytes = res
            .bytes()
            .map_err(|e| PasteError::UpdateFetchFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn verify_checksum(bytes: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_hex(bytes);
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(PasteError::IntegrityMismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

/// `pasteup` -> `pasteup.bak`, `pasteup.exe` -> `pasteup.exe.bak`.
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
