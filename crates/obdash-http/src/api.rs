//! Typed surface over the diagnostics API.

use std::sync::Arc;

use tracing::{debug, instrument};

use obdash_core::error::{ApiError, AuthError, Error};
use obdash_core::models::{FuseBox, ObdDiagnostic, SensorPoint, UserAccount, Vehicle};
use obdash_core::store::{Credential, CredentialStore};
use obdash_core::types::ApiUrl;
use obdash_core::{AccessToken, Credentials, RefreshToken, Result, decode_role};

use crate::client::RestClient;
use crate::endpoints::*;
use crate::session::RestSession;

/// The diagnostics service API.
///
/// Owns the HTTP client and knows every endpoint. Authenticated
/// operations take the token as a parameter; the session layer decides
/// what is in storage at send time.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    api: ApiUrl,
    client: RestClient,
}

impl DashboardApi {
    /// Create a new API handle for the given base URL.
    pub fn new(api: ApiUrl) -> Self {
        let client = RestClient::new(api.clone());
        Self { api, client }
    }

    /// Returns the API base URL for this instance.
    pub fn url(&self) -> &ApiUrl {
        &self.api
    }

    /// Authenticate against the token endpoint and open a session.
    ///
    /// On success the access/refresh/role group is written to `store` as
    /// one atomic value. A claim-decode failure aborts the login and
    /// writes nothing, so the store can never hold a token without its
    /// role.
    #[instrument(skip(self, credentials, store), fields(api = %self.api, username = credentials.username()))]
    pub async fn login(
        &self,
        credentials: Credentials,
        store: Arc<dyn CredentialStore>,
    ) -> Result<RestSession> {
        debug!("Logging in");

        let request = TokenRequest {
            username: credentials.username(),
            password: credentials.password(),
        };

        let response: TokenResponse = match self.client.post(TOKEN, &request).await {
            Err(Error::Api(ApiError { status: 401, .. })) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            other => other?,
        };

        // Decode before storing anything
        let role = decode_role(&response.access)?;

        let credential = Credential::new(
            AccessToken::new(response.access),
            RefreshToken::new(response.refresh),
            role,
        );
        store.save(&credential);

        Ok(RestSession::new(self.clone(), store))
    }

    #[instrument(skip(self, token))]
    pub(crate) async fn metadata(&self, token: Option<&str>) -> Result<Vec<Vehicle>> {
        debug!("Fetching vehicle metadata");
        self.client.get(METADATA, token).await
    }

    #[instrument(skip(self, token))]
    pub(crate) async fn vehicles(&self, token: Option<&str>) -> Result<Vec<Vehicle>> {
        debug!("Listing vehicles");
        self.client.get(VEHICLES, token).await
    }

    #[instrument(skip(self, token))]
    pub(crate) async fn fusebox(
        &self,
        make: &str,
        model: &str,
        year: u16,
        token: Option<&str>,
    ) -> Result<Vec<FuseBox>> {
        debug!(make, model, year, "Fuse-box lookup");
        let query = FuseBoxQuery { make, model, year };
        self.client.get_with(FUSEBOX, &query, token).await
    }

    #[instrument(skip(self, token))]
    pub(crate) async fn sensor_chart(&self, token: Option<&str>) -> Result<Vec<SensorPoint>> {
        debug!("Fetching sensor time-series");
        self.client.get(SENSOR_CHART, token).await
    }

    #[instrument(skip(self, token))]
    pub(crate) async fn obd_diagnostics(&self, token: Option<&str>) -> Result<Vec<ObdDiagnostic>> {
        debug!("Fetching OBD diagnostics");
        self.client.get(OBD, token).await
    }

    #[instrument(skip(self, token))]
    pub(crate) async fn users(&self, token: Option<&str>) -> Result<Vec<UserAccount>> {
        debug!("Listing users");
        self.client.get(USERS, token).await
    }

    #[instrument(skip(self, token))]
    pub(crate) async fn export_csv(&self, token: Option<&str>) -> Result<Vec<u8>> {
        debug!("Downloading CSV export");
        self.client.get_bytes(EXPORT_CSV, token).await
    }

    #[instrument(skip(self, token))]
    pub(crate) async fn export_pdf(&self, token: Option<&str>) -> Result<Vec<u8>> {
        debug!("Downloading PDF export");
        self.client.get_bytes(EXPORT_PDF, token).await
    }
}
