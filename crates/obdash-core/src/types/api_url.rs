//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for the diagnostics service.
///
/// All endpoint paths resolve against the `/api/` prefix under this
/// base. The URL must use HTTPS, or HTTP for localhost only.
///
/// # Example
///
/// ```
/// use obdash_core::ApiUrl;
///
/// let api = ApiUrl::new("https://diag.example.com").unwrap();
/// assert_eq!(api.endpoint_url("metadata/"),
///            "https://diag.example.com/api/metadata/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, has no host, or uses
    /// a scheme other than HTTPS (HTTP allowed only for localhost).
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full URL for an endpoint path under the `/api/` prefix.
    pub fn endpoint_url(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths,
        // so trim before joining the endpoint path
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/api/{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if url.scheme() != "https" && !(url.scheme() == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://diag.example.com").unwrap();
        assert_eq!(api.host(), Some("diag.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(api.host(), Some("127.0.0.1"));
    }

    #[test]
    fn endpoint_url_construction() {
        let api = ApiUrl::new("https://diag.example.com").unwrap();
        assert_eq!(
            api.endpoint_url("fusebox/"),
            "https://diag.example.com/api/fusebox/"
        );
    }

    #[test]
    fn normalizes_trailing_slash_in_endpoint_url() {
        let api = ApiUrl::new("https://diag.example.com/").unwrap();
        assert_eq!(
            api.endpoint_url("token/"),
            "https://diag.example.com/api/token/"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://diag.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/metadata/").is_err());
    }
}
