//! obdash-core - Core types and traits for the obdash diagnostics client.

pub mod claims;
pub mod credentials;
pub mod error;
pub mod models;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use claims::{DEFAULT_ROLE, decode_role};
pub use credentials::Credentials;
pub use error::Error;
pub use models::{FuseBox, ObdDiagnostic, SensorPoint, Severity, UserAccount, Vehicle};
pub use store::{Credential, CredentialStore, MemoryStore};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::Session;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
