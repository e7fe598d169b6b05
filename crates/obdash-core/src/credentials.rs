//! Login credentials type.

use std::fmt;

/// Login credentials for the diagnostics service.
///
/// Holds the username and password pair sent to the token endpoint.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental
/// logging.
///
/// # Example
///
/// ```
/// use obdash_core::Credentials;
///
/// let creds = Credentials::new("tech.alice", "workshop-password");
/// assert_eq!(creds.username(), "tech.alice");
/// ```
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing the login request.
    /// Never log or display this value.
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Clone is intentionally implemented to allow credentials to be reused,
// but the type is not Copy to make credential passing explicit.
impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}
