//! JSON-file credential store.
//!
//! The file holds one object with a single `access_token` key. Its absence is
//! the canonical "logged out" signal on restart. Writes go through to disk;
//! reads are served from an in-memory mirror so a failed write never makes
//! `get` disagree with the last `set`/`clear`.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::{Credential, CredentialStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read credential file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("credential file {path} is not valid JSON: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    mirror: Mutex<Option<Credential>>,
}

impl FileCredentialStore {
    /// Open the store at `path`, loading any credential already saved there.
    /// A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let current = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => {
                let stored: StoredCredential = serde_json::from_str(&raw)
                    .map_err(|source| StoreError::Parse { path: path.clone(), source })?;
                stored.access_token.filter(|token| !token.is_empty()).map(Credential::new)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        tracing::debug!(path = %path.display(), present = current.is_some(), "credential store opened");
        Ok(Self { path, mirror: Mutex::new(current) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, credential: &Credential) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let stored = StoredCredential { access_token: Some(credential.as_str().to_owned()) };
        let raw = serde_json::to_string(&stored).map_err(io::Error::other)?;
        std::fs::write(&self.path, raw)?;
        restrict_permissions(&self.path)
    }

    fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<Credential> {
        self.mirror.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, credential: Credential) {
        let mut mirror = self.mirror.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = self.persist(&credential) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist credential");
        }
        *mirror = Some(credential);
    }

    fn clear(&self) {
        let mut mirror = self.mirror.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = self.remove() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove credential file");
        }
        *mirror = None;
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
