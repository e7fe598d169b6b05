//! Data models returned by the diagnostics API.
//!
//! These mirror the server's wire format; the client does not reshape
//! payloads beyond deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vehicle metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub make: String,
    pub model: String,
    pub year: u16,
    #[serde(default)]
    pub vin: Option<String>,
}

/// A fuse-box lookup result for a make/model/year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuseBox {
    pub make: String,
    pub model: String,
    pub year: u16,
    pub location: String,
    #[serde(default)]
    pub diagram_url: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// A single point in a sensor time-series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub sensor: String,
    pub vehicle: String,
}

/// Severity of an OBD diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// An OBD diagnostic trouble code reported for a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObdDiagnostic {
    pub dtc_code: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
}

/// A user account as listed by the service.
///
/// The `role` here is the server's own record, unlike the client-decoded
/// claim in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
