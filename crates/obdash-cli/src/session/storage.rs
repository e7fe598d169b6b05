//! File-backed session storage.
//!
//! The CLI analogue of the browser's local storage: one JSON file holding
//! the access/refresh/role group plus the API base it was issued by. The
//! session layer reads it before every request and deletes it when the
//! server rejects the session, so a concurrent command simply finds it
//! absent.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use obdash_core::store::{Credential, CredentialStore};
use obdash_core::{AccessToken, ApiUrl, RefreshToken};
use obdash_http::RestSession;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    api: String,
    access_token: String,
    refresh_token: String,
    role: String,
}

/// Get the session file path.
pub fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "obdash").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Credential store backed by the session file.
///
/// Trait methods are infallible to match local-storage semantics; IO
/// failures are logged and treated as "no credential".
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    api: ApiUrl,
}

impl FileStore {
    pub fn new(path: PathBuf, api: ApiUrl) -> Self {
        Self { path, api }
    }

    fn read(&self) -> Option<StoredSession> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(stored) => Some(stored),
            Err(e) => {
                warn!(error = %e, "Invalid session file");
                None
            }
        }
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Option<Credential> {
        let stored = self.read()?;
        Some(Credential::new(
            AccessToken::new(stored.access_token),
            RefreshToken::new(stored.refresh_token),
            stored.role,
        ))
    }

    fn save(&self, credential: &Credential) {
        let stored = StoredSession {
            api: self.api.as_str().to_string(),
            access_token: credential.access().as_str().to_string(),
            refresh_token: credential.refresh().as_str().to_string(),
            role: credential.role().to_string(),
        };

        let json = match serde_json::to_string_pretty(&stored) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize session");
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, &json) {
            warn!(error = %e, "Failed to write session file");
            return;
        }

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        if let Ok(metadata) = fs::metadata(&self.path) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            if let Err(e) = fs::set_permissions(&self.path, perms) {
                warn!(error = %e, "Failed to restrict session file permissions");
            }
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, "Failed to remove session file"),
        }
    }
}

/// Open a session over the persisted credential, if one exists.
pub fn open_session() -> Result<Option<RestSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored: StoredSession = serde_json::from_str(&json).context("Invalid session file")?;

    let api = ApiUrl::new(&stored.api).context("Invalid API URL in session")?;
    let store = Arc::new(FileStore::new(path, api.clone()));

    Ok(Some(RestSession::from_store(api, store)))
}
