//! Token types for bearer authentication.

use std::fmt;

/// An access token for authenticated API requests.
///
/// Access tokens are short-lived JWTs presented as bearer credentials.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treated as opaque by the request path; only the login flow inspects
///   the payload segment to read the unverified role claim
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers or
    /// persisting the session.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token issued alongside the access token.
///
/// Stored for completeness; this client performs no refresh exchange,
/// so the token is persisted but never sent.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn refresh_token_hides_value_in_debug() {
        let token = RefreshToken::new("refresh_token_value_here");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("refresh_token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn access_token_round_trips_exactly() {
        let token = AccessToken::new("a.b.c");
        assert_eq!(token.as_str(), "a.b.c");
    }
}
