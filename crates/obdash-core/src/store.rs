//! Credential storage.
//!
//! The session layer reads the credential from a [`CredentialStore`] at
//! send time and clears it when the server rejects a request as
//! unauthorized. The store is an explicit collaborator passed to the
//! session rather than ambient global state, so tests can substitute it.

use std::fmt;
use std::sync::RwLock;

use crate::tokens::{AccessToken, RefreshToken};

/// The credential group persisted after a successful login.
///
/// Access token, refresh token, and role are written and cleared as a
/// single value so a failed login can never leave a token stored without
/// its role.
#[derive(Clone)]
pub struct Credential {
    access: AccessToken,
    refresh: RefreshToken,
    role: String,
}

impl Credential {
    /// Create a new credential group.
    pub fn new(access: AccessToken, refresh: RefreshToken, role: impl Into<String>) -> Self {
        Self {
            access,
            refresh,
            role: role.into(),
        }
    }

    /// Returns the access token.
    pub fn access(&self) -> &AccessToken {
        &self.access
    }

    /// Returns the refresh token.
    pub fn refresh(&self) -> &RefreshToken {
        &self.refresh
    }

    /// Returns the role claim decoded at login.
    pub fn role(&self) -> &str {
        &self.role
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// Storage for at most one credential group.
///
/// Implementations must make `clear` idempotent: clearing an already
/// empty store is a no-op, never an error. Concurrent readers and
/// writers see the latest committed value; there is no transactional
/// coordination beyond the single-value atomicity of `save`/`clear`.
pub trait CredentialStore: Send + Sync {
    /// Read the current credential, if any.
    fn load(&self) -> Option<Credential>;

    /// Replace the stored credential as one atomic group.
    fn save(&self, credential: &Credential);

    /// Remove the stored credential. Idempotent.
    fn clear(&self);
}

/// In-memory credential store.
///
/// The default store for library use; the CLI substitutes a file-backed
/// implementation so sessions survive across invocations.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<Credential> {
        self.slot.read().unwrap().clone()
    }

    fn save(&self, credential: &Credential) {
        *self.slot.write().unwrap() = Some(credential.clone());
    }

    fn clear(&self) {
        *self.slot.write().unwrap() = None;
    }
}
