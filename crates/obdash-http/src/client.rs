//! Low-level HTTP client for the diagnostics API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use obdash_core::error::{ApiError, Error, TransportError};
use obdash_core::types::ApiUrl;

/// HTTP client for diagnostics API requests.
///
/// Attaches the bearer credential when one is supplied; requests with no
/// token go out unauthenticated. Relies on transport-level defaults for
/// timeouts, and never retries.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl RestClient {
    /// Create a new client for the given API base URL.
    pub fn new(api: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("obdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, api }
    }

    /// Returns the API base URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Make a GET request, decoding the response as JSON.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn get<R>(&self, endpoint: &str, token: Option<&str>) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.api.endpoint_url(endpoint);
        debug!(endpoint, authenticated = token.is_some(), "GET");

        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.headers(self.auth_headers(token)?);
        }

        let response = request.send().await.map_err(from_reqwest)?;
        self.handle_response(response).await
    }

    /// Make a GET request with query parameters, decoding the response as JSON.
    #[instrument(skip(self, params, token), fields(api = %self.api))]
    pub async fn get_with<Q, R>(
        &self,
        endpoint: &str,
        params: &Q,
        token: Option<&str>,
    ) -> Result<R, Error>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint_url(endpoint);
        debug!(endpoint, authenticated = token.is_some(), "GET with params");

        let mut request = self.client.get(&url).query(params);
        if let Some(token) = token {
            request = request.headers(self.auth_headers(token)?);
        }

        let response = request.send().await.map_err(from_reqwest)?;
        self.handle_response(response).await
    }

    /// Make a GET request returning the raw response body.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn get_bytes(&self, endpoint: &str, token: Option<&str>) -> Result<Vec<u8>, Error> {
        let url = self.api.endpoint_url(endpoint);
        debug!(endpoint, authenticated = token.is_some(), "GET bytes");

        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.headers(self.auth_headers(token)?);
        }

        let response = request.send().await.map_err(from_reqwest)?;
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let bytes = response.bytes().await.map_err(from_reqwest)?;
            Ok(bytes.to_vec())
        } else {
            Err(Error::Api(self.parse_error_response(response).await))
        }
    }

    /// Make an unauthenticated POST request with a JSON body.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint_url(endpoint);
        debug!(endpoint, %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(from_reqwest)?;

        self.handle_response(response).await
    }

    /// Create authorization headers for an authenticated request.
    fn auth_headers(&self, token: &str) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        let auth_value =
            HeaderValue::from_str(&auth_value).map_err(|_| TransportError::Http {
                message: "stored token contains invalid header characters".to_string(),
            })?;
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(from_reqwest)?;
            Ok(body)
        } else {
            Err(Error::Api(self.parse_error_response(response).await))
        }
    }

    /// Parse an error response body.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        // The server reports failures as {"detail": ...} or {"error": ...}
        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::new(status, body.detail.or(body.error)),
            Err(_) => ApiError::new(status, None),
        }
    }
}

/// Error body shape used by the diagnostics service.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Map a reqwest error onto the crate's transport taxonomy.
fn from_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let api = ApiUrl::new("https://diag.example.com").unwrap();
        let client = RestClient::new(api.clone());
        assert_eq!(client.api().as_str(), api.as_str());
    }

    #[test]
    fn auth_headers_carry_bearer_token() {
        let api = ApiUrl::new("https://diag.example.com").unwrap();
        let client = RestClient::new(api);
        let headers = client.auth_headers("a.b.c").unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer a.b.c");
    }

    #[test]
    fn auth_headers_reject_control_characters() {
        let api = ApiUrl::new("https://diag.example.com").unwrap();
        let client = RestClient::new(api);
        assert!(client.auth_headers("bad\ntoken").is_err());
    }
}
