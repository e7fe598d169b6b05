//! Endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths (relative to {base}/api/)
// ============================================================================

/// Token obtain endpoint (login).
pub const TOKEN: &str = "token/";

/// Vehicle metadata for the dashboard.
pub const METADATA: &str = "metadata/";

/// Full vehicle list.
pub const VEHICLES: &str = "vehicles/";

/// Fuse-box lookup by make/model/year.
pub const FUSEBOX: &str = "fusebox/";

/// Sensor time-series for charting.
pub const SENSOR_CHART: &str = "sensor-chart/";

/// OBD diagnostic codes.
pub const OBD: &str = "obd/";

/// User account listing.
pub const USERS: &str = "users/";

/// CSV export of sensor data.
pub const EXPORT_CSV: &str = "export/csv/";

/// PDF export of the sensor report.
pub const EXPORT_PDF: &str = "export/pdf/";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for the token endpoint.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
}

/// Query parameters for the fuse-box lookup.
///
/// All three parameters are required; the server rejects partial
/// lookups with a 400.
#[derive(Debug, Serialize)]
pub struct FuseBoxQuery<'a> {
    pub make: &'a str,
    pub model: &'a str,
    pub year: u16,
}
