//! Error types for the obdash client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for obdash operations.
///
/// This error type covers all possible failure modes in the client,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout, decode).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// API errors (non-2xx responses from the diagnostics service).
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (invalid API URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// True when this failure means the session is no longer authorized.
    ///
    /// Callers use this to tell the auto-recovered 401 case apart from
    /// request-specific failures they should report inline.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::Auth(AuthError::SessionExpired) => true,
            Error::Api(api) => api.is_unauthorized(),
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Response body could not be decoded.
    #[error("malformed response body: {message}")]
    Decode { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials provided at login.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The server rejected the session as unauthorized; the stored
    /// credential has been cleared.
    #[error("session expired")]
    SessionExpired,

    /// The role claim could not be decoded from the access token.
    #[error("failed to decode role claim: {reason}")]
    ClaimDecode { reason: String },
}

/// An error response from the diagnostics API.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error detail from the server body, if present.
    pub detail: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },
}
