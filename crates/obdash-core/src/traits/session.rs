//! Authenticated session trait.

use async_trait::async_trait;

use crate::models::{FuseBox, ObdDiagnostic, SensorPoint, UserAccount, Vehicle};
use crate::types::ApiUrl;
use crate::Result;

/// An authenticated session against the diagnostics API.
///
/// Every operation reads the credential from the session's store at send
/// time; a request sent with one token may complete after the token has
/// been replaced or cleared, and implementations must tolerate that.
#[async_trait]
pub trait Session: Send + Sync {
    /// Returns the API base URL this session talks to.
    fn api(&self) -> &ApiUrl;

    /// Returns the role claim from the stored credential, if any.
    ///
    /// The role is decoded without signature verification and is a
    /// display hint only; it must never gate an authorization decision.
    fn role(&self) -> Option<String>;

    /// Fetch vehicle metadata for the dashboard.
    async fn vehicle_metadata(&self) -> Result<Vec<Vehicle>>;

    /// List all vehicles.
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>>;

    /// Look up fuse boxes for a make/model/year.
    async fn fusebox_lookup(&self, make: &str, model: &str, year: u16) -> Result<Vec<FuseBox>>;

    /// Fetch the sensor time-series.
    async fn sensor_chart(&self) -> Result<Vec<SensorPoint>>;

    /// Fetch OBD diagnostic codes.
    async fn obd_diagnostics(&self) -> Result<Vec<ObdDiagnostic>>;

    /// List user accounts.
    async fn list_users(&self) -> Result<Vec<UserAccount>>;

    /// Download the sensor-data CSV export.
    async fn export_csv(&self) -> Result<Vec<u8>>;

    /// Download the sensor-report PDF export.
    async fn export_pdf(&self) -> Result<Vec<u8>>;
}
