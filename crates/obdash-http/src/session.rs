//! Session layer over the diagnostics API.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use obdash_core::error::AuthError;
use obdash_core::models::{FuseBox, ObdDiagnostic, SensorPoint, UserAccount, Vehicle};
use obdash_core::store::CredentialStore;
use obdash_core::traits::Session as SessionTrait;
use obdash_core::types::ApiUrl;
use obdash_core::{Error, Result};

use crate::api::DashboardApi;

/// An authenticated session against the diagnostics API.
///
/// The access token is read from the credential store at send time, so a
/// request may complete after the credential has been replaced or
/// cleared. When any response comes back 401 the session clears the
/// store and signals the expiry channel, then surfaces
/// [`AuthError::SessionExpired`] to the caller. Cleanup is idempotent:
/// concurrent in-flight requests may each observe the 401 and each run
/// it without error.
#[derive(Clone)]
pub struct RestSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    api: DashboardApi,
    store: Arc<dyn CredentialStore>,
    expired_tx: watch::Sender<bool>,
}

impl RestSession {
    pub(crate) fn new(api: DashboardApi, store: Arc<dyn CredentialStore>) -> Self {
        let (expired_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(SessionInner {
                api,
                store,
                expired_tx,
            }),
        }
    }

    /// Open a session over whatever credential the store currently holds.
    ///
    /// The store may be empty; requests then go out unauthenticated and
    /// the server decides what to reject.
    pub fn from_store(api: ApiUrl, store: Arc<dyn CredentialStore>) -> Self {
        Self::new(DashboardApi::new(api), store)
    }

    /// Subscribe to session expiry.
    ///
    /// The channel is level-triggered: it flips to `true` the first time
    /// any request is rejected as unauthorized and stays there. The UI
    /// layer owns the reaction (in a browser this would be the redirect
    /// to the login route).
    pub fn subscribe_expired(&self) -> watch::Receiver<bool> {
        self.inner.expired_tx.subscribe()
    }

    /// Read the access token from the store at send time.
    fn token(&self) -> Option<String> {
        self.inner
            .store
            .load()
            .map(|c| c.access().as_str().to_string())
    }

    /// Apply the 401 recovery policy to a completed call.
    ///
    /// Clearing an already empty store and re-signaling an already
    /// expired channel are both no-ops, so concurrent failures cannot
    /// step on each other.
    fn recover<T>(&self, result: Result<T>) -> Result<T> {
        match result {
            Err(e) if e.is_unauthorized() => {
                info!("Request rejected as unauthorized, clearing session");
                self.inner.store.clear();
                self.inner.expired_tx.send_replace(true);
                Err(Error::Auth(AuthError::SessionExpired))
            }
            other => other,
        }
    }
}

#[async_trait]
impl SessionTrait for RestSession {
    fn api(&self) -> &ApiUrl {
        self.inner.api.url()
    }

    fn role(&self) -> Option<String> {
        self.inner.store.load().map(|c| c.role().to_string())
    }

    #[instrument(skip(self), fields(api = %self.inner.api.url()))]
    async fn vehicle_metadata(&self) -> Result<Vec<Vehicle>> {
        debug!("Fetching metadata");
        let token = self.token();
        self.recover(self.inner.api.metadata(token.as_deref()).await)
    }

    #[instrument(skip(self), fields(api = %self.inner.api.url()))]
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        debug!("Listing vehicles");
        let token = self.token();
        self.recover(self.inner.api.vehicles(token.as_deref()).await)
    }

    #[instrument(skip(self), fields(api = %self.inner.api.url()))]
    async fn fusebox_lookup(&self, make: &str, model: &str, year: u16) -> Result<Vec<FuseBox>> {
        debug!("Fuse-box lookup");
        let token = self.token();
        self.recover(
            self.inner
                .api
                .fusebox(make, model, year, token.as_deref())
                .await,
        )
    }

    #[instrument(skip(self), fields(api = %self.inner.api.url()))]
    async fn sensor_chart(&self) -> Result<Vec<SensorPoint>> {
        debug!("Fetching sensor chart");
        let token = self.token();
        self.recover(self.inner.api.sensor_chart(token.as_deref()).await)
    }

    #[instrument(skip(self), fields(api = %self.inner.api.url()))]
    async fn obd_diagnostics(&self) -> Result<Vec<ObdDiagnostic>> {
        debug!("Fetching OBD diagnostics");
        let token = self.token();
        self.recover(self.inner.api.obd_diagnostics(token.as_deref()).await)
    }

    #[instrument(skip(self), fields(api = %self.inner.api.url()))]
    async fn list_users(&self) -> Result<Vec<UserAccount>> {
        debug!("Listing users");
        let token = self.token();
        self.recover(self.inner.api.users(token.as_deref()).await)
    }

    #[instrument(skip(self), fields(api = %self.inner.api.url()))]
    async fn export_csv(&self) -> Result<Vec<u8>> {
        debug!("Downloading CSV export");
        let token = self.token();
        self.recover(self.inner.api.export_csv(token.as_deref()).await)
    }

    #[instrument(skip(self), fields(api = %self.inner.api.url()))]
    async fn export_pdf(&self) -> Result<Vec<u8>> {
        debug!("Downloading PDF export");
        let token = self.token();
        self.recover(self.inner.api.export_pdf(token.as_deref()).await)
    }
}

impl std::fmt::Debug for RestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestSession")
            .field("api", &self.inner.api.url())
            .field("credential", &"[REDACTED]")
            .finish()
    }
}
